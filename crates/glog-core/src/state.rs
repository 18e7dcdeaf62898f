//! Client state: connection settings plus the resumption cursor.
//!
//! [`StateFile::load`] reads `~/.config/glog/<name>.json` layered on top of
//! built-in defaults, so a file written by an older client with missing keys
//! still loads. [`StateFile::save`] replaces the whole file atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_STATE: &str = r#"{
  "lv": 0,
  "host": "",
  "token": "",
  "ignoreCert": false,
  "ls": 0,
  "le": 0
}"#;

pub const DEFAULT_STATE_NAME: &str = "config.json";

// ---------------------------------------------------------------------------
// ClientState
// ---------------------------------------------------------------------------

/// Persisted client state. All-zero cursors mean "nothing viewed yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Server time returned by the last live-tail fetch.
    #[serde(rename = "lv", default)]
    pub last_view: i64,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub token: String,
    #[serde(rename = "ignoreCert", alias = "ignorecert", default)]
    pub ignore_cert: bool,
    /// Start of the last displayed window, for `viewlast`.
    #[serde(rename = "ls", default)]
    pub last_start: i64,
    /// End of the last displayed window, for `viewlast`.
    #[serde(rename = "le", default)]
    pub last_end: i64,
}

impl ClientState {
    /// Host and token must both be non-blank before anything is fetched.
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.token.trim().is_empty()
    }

    /// Whether a previous view recorded a window worth replaying.
    pub fn has_history(&self) -> bool {
        self.last_start != self.last_end && !(self.last_start == 0 && self.last_end == 0)
    }

    /// Remember the displayed window, widened by one second each side.
    pub fn record_window(&mut self, first: i64, last: i64) {
        self.last_start = first.min(last).saturating_sub(1);
        self.last_end = first.max(last).saturating_add(1);
    }
}

// ---------------------------------------------------------------------------
// StateFile
// ---------------------------------------------------------------------------

/// Location of one named state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// State file `name` (`.json` appended when missing) in the glog state
    /// directory.
    pub fn named(name: &str) -> Self {
        Self::at(state_dir().join(file_name(name)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<ClientState> {
        let state = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_STATE, config::FileFormat::Json))
            .add_source(config::File::from(self.path.as_path()).format(config::FileFormat::Json))
            .build()?
            .try_deserialize()?;
        Ok(state)
    }

    /// Load and require host and token.
    pub fn load_configured(&self) -> Result<ClientState> {
        let state = self.load()?;
        if !state.is_configured() {
            return Err(Error::NotConfigured {
                path: self.path.clone(),
            });
        }
        Ok(state)
    }

    /// Write an unpopulated state file.
    pub fn create(&self) -> Result<ClientState> {
        let state = ClientState::default();
        self.save(&state)?;
        Ok(state)
    }

    /// Replace the file with `state` via write-to-temp and rename.
    pub fn save(&self, state: &ClientState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(state).map_err(std::io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = open_private(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), last_view = state.last_view, "state saved");
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn file_name(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    }
}

fn state_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("glog")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
