//! TimeResolver — turns a user time expression into a Unix-epoch bound.
//!
//! Accepted expressions, tried in this order:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | empty | `0`, the bound is unset |
//! | `<n><unit>`, unit one of `s m h d w` | `now - n * unit` |
//! | `Jan  2 15:04:05` | syslog stamp, current year assumed |
//! | `Mon Jan  2 15:04:05 2006` | ANSI C |
//! | `02 Jan 06 15:04 MST` | RFC 822 |
//! | `02 Jan 06 15:04 -0700` | RFC 822 with numeric zone |
//! | `Mon Jan  2 15:04:05 MST 2006` | Unix `date` |
//! | `2006-01-02 15:04:05` | ISO-like, local zone |
//! | `2006-01-02T15:04:05Z` | RFC 3339 |
//!
//! Absolute times strictly after `now` are rejected. Zone-less layouts and
//! unknown zone abbreviations are read in the resolver's zone.

use std::fmt::Display;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::error::{Error, Result};

/// Fixed human-readable stamp used for every timestamp glog prints. It is
/// also the first layout [`TimeResolver`] accepts, so printed stamps can be
/// pasted back into `--since`/`--until`.
pub const STAMP_FORMAT: &str = "%b %e %H:%M:%S";

const UNIT_SECONDS: [(char, i64); 5] = [
    ('s', 1),
    ('m', 60),
    ('h', 60 * 60),
    ('d', 60 * 60 * 24),
    ('w', 60 * 60 * 24 * 7),
];

enum Layout {
    /// No year in the input; the resolver's current year is assumed.
    NoYear(&'static str),
    Naive(&'static str),
    /// Numeric offset (`%z`) in the input.
    Offset(&'static str),
    /// Zone abbreviation as the whitespace-separated token at `zone_at`.
    Abbrev { fmt: &'static str, zone_at: usize },
    Rfc3339,
}

const LAYOUTS: &[Layout] = &[
    Layout::NoYear(STAMP_FORMAT),
    Layout::Naive("%a %b %e %H:%M:%S %Y"),
    Layout::Abbrev { fmt: "%d %b %y %H:%M", zone_at: 4 },
    Layout::Offset("%d %b %y %H:%M %z"),
    Layout::Abbrev { fmt: "%a %b %e %H:%M:%S %Y", zone_at: 4 },
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
    Layout::Rfc3339,
];

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^([0-9]+)([smhdw])$").expect("duration regex is valid"))
}

/// Resolves time expressions relative to a fixed `now`.
///
/// Holding `now` instead of reading the clock keeps resolution pure, so a
/// whole command line resolves against one instant.
#[derive(Debug, Clone)]
pub struct TimeResolver<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl TimeResolver<Local> {
    /// Resolver anchored at the current instant in the local zone.
    pub fn local() -> Self {
        Self::at(Local::now())
    }
}

impl<Tz: TimeZone> TimeResolver<Tz> {
    pub fn at(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// The anchor instant as epoch seconds.
    pub fn now(&self) -> i64 {
        self.now.timestamp()
    }

    /// Resolve `expr` to epoch seconds. Empty input resolves to `0`.
    pub fn resolve(&self, expr: &str) -> Result<i64> {
        let input = expr.trim();
        if input.is_empty() {
            return Ok(0);
        }
        if let Some(caps) = duration_regex().captures(input) {
            return self.relative(input, &caps[1], &caps[2]);
        }
        let ts = self.absolute(input)?;
        if ts > self.now() {
            return Err(Error::FutureTime {
                input: input.to_string(),
            });
        }
        Ok(ts)
    }

    fn relative(&self, input: &str, digits: &str, unit: &str) -> Result<i64> {
        let overflow = || Error::Overflow {
            input: input.to_string(),
        };
        let unit = unit.to_ascii_lowercase();
        let factor = UNIT_SECONDS
            .iter()
            .find(|(u, _)| unit.starts_with(*u))
            .map(|(_, secs)| *secs)
            .ok_or_else(|| Error::parse(input, "unknown duration unit"))?;
        let count: i64 = digits.parse().map_err(|_| overflow())?;
        let span = count.checked_mul(factor).ok_or_else(overflow)?;
        self.now().checked_sub(span).ok_or_else(overflow)
    }

    fn absolute(&self, input: &str) -> Result<i64> {
        let input = input.split_whitespace().collect::<Vec<_>>().join(" ");
        LAYOUTS
            .iter()
            .find_map(|layout| self.try_layout(layout, &input))
            .ok_or_else(|| Error::parse(&input, "not a duration and no known time format matches"))
    }

    fn try_layout(&self, layout: &Layout, input: &str) -> Option<i64> {
        match layout {
            Layout::NoYear(fmt) => {
                let with_year = format!("{} {input}", self.now.year());
                let naive = NaiveDateTime::parse_from_str(&with_year, &format!("%Y {fmt}")).ok()?;
                self.localize(&naive)
            }
            Layout::Naive(fmt) => {
                let naive = NaiveDateTime::parse_from_str(input, fmt).ok()?;
                self.localize(&naive)
            }
            Layout::Offset(fmt) => DateTime::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.timestamp()),
            Layout::Abbrev { fmt, zone_at } => {
                let mut tokens: Vec<&str> = input.split(' ').collect();
                if tokens.len() <= *zone_at {
                    return None;
                }
                let zone = tokens.remove(*zone_at);
                if !zone.chars().all(|c| c.is_ascii_alphabetic()) {
                    return None;
                }
                let naive = NaiveDateTime::parse_from_str(&tokens.join(" "), fmt).ok()?;
                match zone.to_ascii_uppercase().as_str() {
                    "UTC" | "UT" | "GMT" | "Z" => Some(Utc.from_utc_datetime(&naive).timestamp()),
                    _ => self.localize(&naive),
                }
            }
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.timestamp()),
        }
    }

    /// Place a wall-clock time in the resolver's zone. Ambiguous times (DST
    /// fold) take the earlier instant; times inside a DST gap don't exist.
    fn localize(&self, naive: &NaiveDateTime) -> Option<i64> {
        self.now
            .timezone()
            .from_local_datetime(naive)
            .earliest()
            .map(|dt| dt.timestamp())
    }
}

/// Format epoch seconds with [`STAMP_FORMAT`] in `tz`.
pub fn format_stamp<Tz>(epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(epoch, 0) {
        Some(dt) => dt.with_timezone(tz).format(STAMP_FORMAT).to_string(),
        None => epoch.to_string(),
    }
}
