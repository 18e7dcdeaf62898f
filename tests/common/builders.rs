//! Test builders — ergonomic constructors for log entries, responses and
//! client state.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use glog_core::{ClientState, CustomLogEntry, FetchResponse, SyslogEntry};

// ---------------------------------------------------------------------------
// Entry builders
// ---------------------------------------------------------------------------

/// Fluent builder for [`SyslogEntry`] fixtures.
///
/// ```rust
/// let entry = SyslogBuilder::new(100, "Failed password for root")
///     .tag("sshd")
///     .pid(5)
///     .level(3)
///     .count(2)
///     .build();
/// ```
pub struct SyslogBuilder {
    entry: SyslogEntry,
}

impl SyslogBuilder {
    pub fn new(date: i64, message: impl Into<String>) -> Self {
        Self {
            entry: SyslogEntry {
                date,
                hostname: "web1".to_string(),
                tag: "sshd".to_string(),
                pid: 1,
                log_level: 0,
                message: message.into(),
                count: 1,
            },
        }
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.entry.hostname = hostname.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.entry.tag = tag.into();
        self
    }

    pub fn pid(mut self, pid: i32) -> Self {
        self.entry.pid = pid;
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.entry.log_level = level;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.entry.count = count;
        self
    }

    pub fn build(self) -> SyslogEntry {
        self.entry
    }
}

/// Fluent builder for [`CustomLogEntry`] fixtures.
pub struct CustomBuilder {
    entry: CustomLogEntry,
}

impl CustomBuilder {
    pub fn new(date: i64, message: impl Into<String>) -> Self {
        Self {
            entry: CustomLogEntry {
                date,
                hostname: "web1".to_string(),
                tag: "app".to_string(),
                source: String::new(),
                message: message.into(),
                count: 1,
            },
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.entry.tag = tag.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.entry.source = source.into();
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.entry.count = count;
        self
    }

    pub fn build(self) -> CustomLogEntry {
        self.entry
    }
}

// ---------------------------------------------------------------------------
// Responses and state
// ---------------------------------------------------------------------------

/// Wire JSON for a fetch response.
pub fn response_json(
    time: i64,
    sys_logs: Vec<SyslogEntry>,
    custom_logs: Vec<CustomLogEntry>,
) -> serde_json::Value {
    serde_json::to_value(FetchResponse {
        time,
        sys_logs,
        custom_logs,
    })
    .expect("fetch response serialises")
}

/// A state pointing at `host` with a token set and no cursor yet.
pub fn configured_state(host: &str) -> ClientState {
    ClientState {
        host: host.to_string(),
        token: "test-token".to_string(),
        ..Default::default()
    }
}

/// Current Unix time in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
