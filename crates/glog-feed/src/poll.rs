//! PollLoop — build, send, interpret, render, persist, and repeat while
//! following.
//!
//! Each iteration completes before the next starts, so at most one exchange
//! is ever in flight. The server-returned time becomes the next `since`
//! only after a response decoded, so a failed exchange never skips entries.
//! The loop has no iteration cap; in follow mode the caller cancels it.

use std::fmt::Display;
use std::io::Write;
use std::time::Duration;

use chrono::{Local, TimeZone, Utc};
use glog_core::merge::merge;
use glog_core::{ClientState, FetchResponse, MergedLog, Query, Result, StateFile};
use glog_view::Presenter;

use crate::Transport;

/// Per-exchange timeout for a one-shot fetch.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);
/// Per-exchange timeout while following; the server long-polls.
pub const LONG_TIMEOUT: Duration = Duration::from_secs(2 * 60);

pub struct PollLoop<T, W, Tz: TimeZone = Local> {
    transport: T,
    presenter: Presenter<W, Tz>,
    query: Query,
    state: ClientState,
    /// `None` for replays, which must not move any cursor.
    store: Option<StateFile>,
}

impl<T, W, Tz> PollLoop<T, W, Tz>
where
    T: Transport,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(
        transport: T,
        presenter: Presenter<W, Tz>,
        query: Query,
        state: ClientState,
        store: StateFile,
    ) -> Self {
        Self {
            transport,
            presenter,
            query,
            state,
            store: Some(store),
        }
    }

    /// A loop that never writes the state file.
    pub fn without_persistence(
        transport: T,
        presenter: Presenter<W, Tz>,
        query: Query,
        state: ClientState,
    ) -> Self {
        Self {
            transport,
            presenter,
            query,
            state,
            store: None,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn into_parts(self) -> (ClientState, Presenter<W, Tz>) {
        (self.state, self.presenter)
    }

    fn timeout(&self) -> Duration {
        if self.query.follow {
            LONG_TIMEOUT
        } else {
            SHORT_TIMEOUT
        }
    }

    /// Run from the query's initial `since`, resolved against the current
    /// clock.
    pub async fn run(&mut self) -> Result<()> {
        let since = self
            .query
            .initial_since(self.state.last_view, Utc::now().timestamp());
        self.run_from(since).await
    }

    /// Poll once, or forever when following. Any error ends the loop.
    pub async fn run_from(&mut self, mut since: i64) -> Result<()> {
        loop {
            since = self.poll_once(since).await?;
            if !self.query.follow {
                return Ok(());
            }
        }
    }

    /// One full iteration. Returns the `since` for the next one.
    pub async fn poll_once(&mut self, since: i64) -> Result<i64> {
        let request = self.query.request(&self.state.token, since);
        tracing::debug!(
            since,
            until = ?request.until,
            follow = request.follow,
            "polling"
        );
        let body = self.transport.fetch(&request, self.timeout()).await?;
        let response = FetchResponse::from_body(&body)?;
        tracing::debug!(
            time = response.time,
            sys = response.sys_logs.len(),
            custom = response.custom_logs.len(),
            "fetched"
        );

        let next_since = response.time;
        let logs = merge(response.sys_logs, response.custom_logs, self.query.reverse);
        self.render(&logs, since)?;
        self.persist(&logs, next_since)?;
        Ok(next_since)
    }

    fn render(&mut self, logs: &[MergedLog], since: i64) -> Result<()> {
        if !logs.is_empty() {
            self.presenter.render(logs, !self.query.follow)?;
        } else if !self.query.follow {
            let notice = if self.query.filters.is_active() {
                "No logs match this filter".to_string()
            } else {
                format!("No new logs since {}", self.presenter.stamp(since))
            };
            self.presenter.notice(&notice)?;
        }
        Ok(())
    }

    fn persist(&mut self, logs: &[MergedLog], next_since: i64) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        if self.query.all {
            return Ok(());
        }
        if logs.is_empty() && self.query.is_bounded() {
            return Ok(());
        }

        // A bounded query must not overwrite the live-tail position.
        if !self.query.is_bounded() {
            self.state.last_view = next_since;
        }
        if !self.query.follow && !logs.is_empty() {
            let (first, last) = logs.iter().fold((i64::MAX, i64::MIN), |(lo, hi), log| {
                (lo.min(log.date), hi.max(log.date))
            });
            self.state.record_window(first, last);
        }
        tracing::debug!(
            last_view = self.state.last_view,
            last_start = self.state.last_start,
            last_end = self.state.last_end,
            "cursor advanced"
        );
        store.save(&self.state)
    }
}
