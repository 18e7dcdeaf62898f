//! Highlight capability for terminal output.
//!
//! The presenter only asks for two things: plain text, or text with the
//! timestamp and repeat-count annotations picked out. Colour is dropped when
//! `--no-color` is passed, `NO_COLOR` is set, or stdout is not a terminal.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Plain,
    Highlighted,
}

impl Highlight {
    /// Pick the capability for stdout.
    pub fn detect(no_color: bool) -> Self {
        let env_off = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color || env_off || !std::io::stdout().is_tty() {
            Highlight::Plain
        } else {
            Highlight::Highlighted
        }
    }

    /// Timestamp in the banner.
    pub fn stamp(self, text: &str) -> String {
        match self {
            Highlight::Plain => text.to_string(),
            Highlight::Highlighted => text.bold().green().to_string(),
        }
    }

    /// Repeat-count annotation, e.g. `(3 x)`.
    pub fn count(self, count: u32) -> String {
        let text = format!("({count} x)");
        match self {
            Highlight::Plain => text,
            Highlight::Highlighted => text.blue().to_string(),
        }
    }
}
