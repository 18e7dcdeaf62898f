//! Wire types exchanged with the log aggregation service, and the merged
//! display projection.
//!
//! Field names on the wire are the service's short keys; the Rust names are
//! the long forms.

use serde::{Deserialize, Serialize};

/// Log type selector sent with every request. `0` asks for every source.
pub const LOG_TYPE_ALL: i32 = 0;

/// One fetch exchange. Rebuilt every poll iteration with an updated `since`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(rename = "t")]
    pub token: String,
    #[serde(rename = "sin")]
    pub since: i64,
    #[serde(rename = "unt", default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
    #[serde(rename = "lt")]
    pub log_type: i32,
    #[serde(rename = "foll")]
    pub follow: bool,
    #[serde(rename = "hnf", default, skip_serializing_if = "Option::is_none")]
    pub hostname_filter: Option<Vec<String>>,
    #[serde(rename = "mf", default, skip_serializing_if = "Option::is_none")]
    pub message_filter: Option<Vec<String>>,
    #[serde(rename = "tf", default, skip_serializing_if = "Option::is_none")]
    pub tag_filter: Option<Vec<String>>,
    /// `true` combines the filters with OR, `false` with AND.
    #[serde(rename = "fi", default, skip_serializing_if = "is_false")]
    pub filter_operator: bool,
    #[serde(rename = "lm", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "r", default, skip_serializing_if = "is_false")]
    pub reverse: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn one() -> u32 {
    1
}

/// One aggregated occurrence of a system log line. `count > 1` means the
/// service already folded duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogEntry {
    #[serde(rename = "d")]
    pub date: i64,
    #[serde(rename = "h", default)]
    pub hostname: String,
    #[serde(rename = "t", default)]
    pub tag: String,
    #[serde(rename = "p", default)]
    pub pid: i32,
    #[serde(rename = "l", default)]
    pub log_level: i32,
    #[serde(rename = "m", default)]
    pub message: String,
    #[serde(rename = "c", default = "one")]
    pub count: u32,
}

/// One aggregated occurrence from a custom (non-system) log source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLogEntry {
    #[serde(rename = "d")]
    pub date: i64,
    #[serde(rename = "h", default)]
    pub hostname: String,
    #[serde(rename = "t", default)]
    pub tag: String,
    #[serde(rename = "s", default)]
    pub source: String,
    #[serde(rename = "m", default)]
    pub message: String,
    #[serde(rename = "c", default = "one")]
    pub count: u32,
}

/// Server answer to a [`FetchRequest`]. `time` is the authoritative next
/// cursor; the client never derives it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "sl", default, deserialize_with = "null_as_empty")]
    pub sys_logs: Vec<SyslogEntry>,
    #[serde(rename = "cl", default, deserialize_with = "null_as_empty")]
    pub custom_logs: Vec<CustomLogEntry>,
}

impl FetchResponse {
    /// Parse a raw response body.
    pub fn from_body(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.sys_logs.is_empty() && self.custom_logs.is_empty()
    }
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

/// Display-ready projection of either entry kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLog {
    pub date: i64,
    pub hostname: String,
    pub tag: String,
    pub message: String,
    pub count: u32,
}

impl From<SyslogEntry> for MergedLog {
    fn from(entry: SyslogEntry) -> Self {
        let message = if entry.log_level > 0 {
            format!("({}) {}", entry.log_level, entry.message)
        } else {
            entry.message
        };
        MergedLog {
            date: entry.date,
            hostname: entry.hostname,
            tag: format!("{}({})", entry.tag, entry.pid),
            message,
            count: entry.count,
        }
    }
}

impl From<CustomLogEntry> for MergedLog {
    fn from(entry: CustomLogEntry) -> Self {
        let message = if entry.source.is_empty() {
            entry.message
        } else {
            format!("[{}] {}", entry.source, entry.message)
        };
        MergedLog {
            date: entry.date,
            hostname: entry.hostname,
            tag: entry.tag,
            message,
            count: entry.count,
        }
    }
}
