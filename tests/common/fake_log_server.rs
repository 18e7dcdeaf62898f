//! Fake glog aggregation service for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /glog/fetch`: every request body is recorded, and
//! the next scripted reply is returned. Once the script runs out, the server
//! answers with an empty response whose time is the request's `since`.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = FakeLogServer::start().await.unwrap();
//! server.reply_json(response_json(500, vec![], vec![])).await;
//! let transport = HttpTransport::new(&server.base_url(), false).unwrap();
//! ```

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct ServerState {
    replies: VecDeque<(StatusCode, String)>,
    requests: Vec<serde_json::Value>,
}

/// Handle to the running fake service.
pub struct FakeLogServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeLogServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/glog/fetch", post(fetch))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the service (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a successful JSON reply.
    pub async fn reply_json(&self, body: serde_json::Value) {
        self.reply(StatusCode::OK, &body.to_string()).await;
    }

    /// Queue an arbitrary reply.
    pub async fn reply(&self, status: StatusCode, body: &str) {
        self.state
            .lock()
            .await
            .replies
            .push_back((status, body.to_string()));
    }

    /// Every request body received so far, oldest first.
    pub async fn requests(&self) -> Vec<serde_json::Value> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn fetch(
    State(state): State<Arc<Mutex<ServerState>>>,
    Json(request): Json<serde_json::Value>,
) -> (StatusCode, String) {
    let mut state = state.lock().await;
    let since = request.get("sin").and_then(|v| v.as_i64()).unwrap_or(0);
    state.requests.push(request);
    state.replies.pop_front().unwrap_or_else(|| {
        (
            StatusCode::OK,
            serde_json::json!({"t": since, "sl": [], "cl": []}).to_string(),
        )
    })
}
