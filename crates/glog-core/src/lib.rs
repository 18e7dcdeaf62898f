//! glog-core — the pure part of the glog log-tailing client.
//!
//! Nothing in this crate talks to the network. It turns operator input into
//! a validated [`Query`], reconciles server responses into one ordered
//! [`MergedLog`] sequence, and persists the resumption cursor.
//!
//! # Architecture
//!
//! ```text
//! ViewOptions ──► TimeResolver + FilterNormalizer ──► Query ──► FetchRequest
//!                                                                   │
//!          ClientState ◄── PollLoop (glog-feed) ◄── FetchResponse ◄─┘
//!                               │
//!                               └──► merge ──► Presenter (glog-view)
//! ```

pub mod error;
pub mod filter;
pub mod merge;
pub mod query;
pub mod state;
pub mod time;
pub mod types;

pub use error::{Error, Result};
pub use filter::Filters;
pub use query::{Query, ViewOptions, Window};
pub use state::{ClientState, StateFile};
pub use time::TimeResolver;
pub use types::{CustomLogEntry, FetchRequest, FetchResponse, MergedLog, SyslogEntry};
