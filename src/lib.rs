//! glog — tail logs from a remote aggregation service.
//!
//! The binary is a thin shell around three library crates, re-exported here
//! so integration tests can reach everything through one path.
//!
//! # Architecture
//!
//! ```text
//! cli ──► ViewOptions ──► Query ──► PollLoop ──► Transport ──► service
//!                                      │
//!                   StateFile ◄────────┼──► merge ──► Presenter ──► stdout
//! ```
//!
//! One poll iteration completes before the next starts; follow mode repeats
//! until the process is interrupted.

pub mod cli;

pub use glog_core::{
    ClientState, CustomLogEntry, Error, FetchRequest, FetchResponse, Filters, MergedLog, Query,
    StateFile, SyslogEntry, TimeResolver, ViewOptions, Window,
};
pub use glog_feed::{view_last, HttpTransport, PollLoop, Transport};
pub use glog_view::{Highlight, Presenter};
