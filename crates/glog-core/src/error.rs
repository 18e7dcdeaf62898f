//! Error type shared by every glog layer.
//!
//! Validation errors (`Parse`, `Overflow`, `FutureTime`, `NegationPosition`,
//! `UsageConflict`) are raised before any network exchange. `Transport` and
//! `Decode` abort a poll iteration without touching the persisted cursor.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("can't parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("duration '{input}' overflows the timestamp range")]
    Overflow { input: String },

    #[error("time '{input}' is in the future, it must be in the past")]
    FutureTime { input: String },

    #[error("negation '{token}' must be on the first filter element, it negates the whole filter")]
    NegationPosition { token: String },

    #[error("{0}")]
    UsageConflict(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("can't decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no history: nothing has been viewed yet")]
    NoHistory,

    #[error("you need to fill \"host\" and \"token\" in {}", path.display())]
    NotConfigured { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't read state file: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
