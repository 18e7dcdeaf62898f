//! HTTP transport: `POST <host>/glog/fetch` with a JSON body.

use std::time::Duration;

use glog_core::{Error, FetchRequest, Result};

use crate::Transport;

/// Path of the fetch endpoint, relative to the configured host.
pub const FETCH_PATH: &str = "glog/fetch";

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// `ignore_cert` turns off TLS certificate validation, for services
    /// behind a self-signed certificate.
    pub fn new(host: &str, ignore_cert: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(ignore_cert)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: endpoint(host),
        })
    }
}

fn endpoint(host: &str) -> String {
    format!("{}/{}", host.trim().trim_end_matches('/'), FETCH_PATH)
}

impl Transport for HttpTransport {
    async fn fetch(&self, request: &FetchRequest, timeout: Duration) -> Result<String> {
        tracing::debug!(url = %self.url, ?timeout, since = request.since, "sending fetch");
        let response = self
            .client
            .post(&self.url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("no answer from {} within {timeout:?}", self.url))
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(%status, "fetch rejected");
            return Err(Error::Transport(format!(
                "server answered {status}: {}",
                body.trim()
            )));
        }
        Ok(body)
    }
}
