//! Shared test utilities for glog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_log_server;

pub use assertions::*;
pub use builders::*;
pub use fake_log_server::FakeLogServer;
