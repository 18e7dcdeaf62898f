//! glog-feed — the network side of glog.
//!
//! A [`Transport`] performs one request/response exchange with the log
//! aggregation service. [`PollLoop`] drives it: build a request, send it,
//! decode the answer, hand the merged entries to the presenter, advance the
//! cursor, and repeat while following.

use std::future::Future;
use std::time::Duration;

use glog_core::{FetchRequest, Result};

pub mod http;
pub mod poll;
pub mod replay;

pub use http::HttpTransport;
pub use poll::PollLoop;
pub use replay::view_last;

/// One request/response exchange with the aggregation service.
///
/// Implementations return the raw response body; decoding is the poll
/// loop's job so a malformed body surfaces as a decode error, not a
/// transport error.
pub trait Transport {
    fn fetch(
        &self,
        request: &FetchRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<String>> + Send;
}

impl<T: Transport + Sync> Transport for &T {
    fn fetch(
        &self,
        request: &FetchRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<String>> + Send {
        (**self).fetch(request, timeout)
    }
}
