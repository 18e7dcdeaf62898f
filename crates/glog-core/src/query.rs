//! View options, usage validation and request building.
//!
//! [`ViewOptions`] is what the operator asked for, still as raw strings.
//! [`Query`] is the validated, resolved plan the poll loop runs; it is
//! immutable and turns into a fresh [`FetchRequest`] per iteration.

use chrono::TimeZone;

use crate::error::{Error, Result};
use crate::filter::Filters;
use crate::time::TimeResolver;
use crate::types::{FetchRequest, LOG_TYPE_ALL};

/// Without an explicit since, never reach further back than this.
pub const STALENESS_CAP_SECS: i64 = 60 * 60;

/// Raw operator input for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub since: String,
    pub until: String,
    pub all: bool,
    pub hostname: Vec<String>,
    pub tag: Vec<String>,
    pub message: Vec<String>,
    /// Combine filters with OR instead of AND.
    pub filter_or: bool,
    pub limit: Option<u32>,
    pub reverse: bool,
    pub follow: bool,
    pub raw: bool,
}

impl ViewOptions {
    /// Reject mutually exclusive combinations. Runs before anything else
    /// touches the state file or the network.
    pub fn validate(&self) -> Result<()> {
        if self.reverse && self.follow {
            return Err(conflict("r", "f"));
        }
        if self.all && self.follow {
            return Err(conflict("a", "f"));
        }
        if self.all && !self.since.trim().is_empty() {
            return Err(Error::UsageConflict(
                "can't view everything and set a start time at once (-a and -s)".into(),
            ));
        }
        if self.limit().is_some() && self.follow {
            return Err(conflict("n", "f"));
        }
        Ok(())
    }

    /// Limit with `0` treated as unset.
    pub fn limit(&self) -> Option<u32> {
        self.limit.filter(|n| *n > 0)
    }

    /// Resolve the explicit bounds. An explicit since is made inclusive by
    /// asking for everything after `since - 1`.
    pub fn window<Tz: TimeZone>(&self, resolver: &TimeResolver<Tz>) -> Result<Window> {
        let since = match resolver.resolve(&self.since)? {
            0 => None,
            ts => Some(ts - 1),
        };
        let until = match resolver.resolve(&self.until)? {
            0 => None,
            ts => Some(ts),
        };
        Ok(Window { since, until })
    }
}

fn conflict(a: &str, b: &str) -> Error {
    Error::UsageConflict(format!("can't use -{a} and -{b} together"))
}

/// Explicit time bounds, both epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub since: Option<i64>,
    pub until: Option<i64>,
}

/// A validated fetch plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub window: Window,
    pub all: bool,
    pub filters: Filters,
    pub filter_or: bool,
    pub limit: Option<u32>,
    pub reverse: bool,
    pub follow: bool,
}

impl Query {
    /// Validate `opts`, resolve its times and normalise its filters.
    pub fn from_options<Tz: TimeZone>(
        opts: &ViewOptions,
        resolver: &TimeResolver<Tz>,
    ) -> Result<Self> {
        opts.validate()?;
        let window = opts.window(resolver)?;
        let filters = Filters::new(&opts.hostname, &opts.tag, &opts.message)?;
        tracing::debug!(?window, ?filters, "resolved view options");
        Ok(Self {
            window,
            all: opts.all,
            filters,
            filter_or: opts.filter_or,
            limit: opts.limit(),
            reverse: opts.reverse,
            follow: opts.follow,
        })
    }

    /// A one-shot fetch over a fixed window: never follows, never "all".
    pub fn bounded(window: Window, filters: Filters, opts: &ViewOptions) -> Self {
        Self {
            window,
            all: false,
            filters,
            filter_or: opts.filter_or,
            limit: opts.limit(),
            reverse: opts.reverse,
            follow: false,
        }
    }

    /// First `since` to send: explicit bound, else the stored cursor capped
    /// at [`STALENESS_CAP_SECS`] ago, else `0` for an "all" fetch.
    pub fn initial_since(&self, last_view: i64, now: i64) -> i64 {
        if self.all {
            return 0;
        }
        match self.window.since {
            Some(since) => since,
            None => last_view.max(now - STALENESS_CAP_SECS),
        }
    }

    /// An explicit upper bound makes this a historical query.
    pub fn is_bounded(&self) -> bool {
        self.window.until.is_some()
    }

    pub fn request(&self, token: &str, since: i64) -> FetchRequest {
        FetchRequest {
            token: token.to_string(),
            since,
            until: self.window.until,
            log_type: LOG_TYPE_ALL,
            follow: self.follow,
            hostname_filter: self.filters.hostname.clone(),
            message_filter: self.filters.message.clone(),
            tag_filter: self.filters.tag.clone(),
            filter_operator: self.filter_or,
            limit: self.limit,
            reverse: self.reverse,
        }
    }
}
