//! ViewLast — replay the window a previous view displayed.

use std::fmt::Display;
use std::io::Write;

use chrono::TimeZone;
use glog_core::{ClientState, Error, Filters, Query, Result, TimeResolver, ViewOptions, Window};
use glog_view::Presenter;

use crate::{PollLoop, Transport};

/// Fetch the stored `last_start..=last_end` window once. `opts.since` and
/// `opts.until` override either bound. Nothing is persisted.
pub async fn view_last<T, W, Tz, Rz>(
    transport: T,
    mut presenter: Presenter<W, Tz>,
    state: &ClientState,
    opts: &ViewOptions,
    resolver: &TimeResolver<Rz>,
) -> Result<()>
where
    T: Transport,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
    Rz: TimeZone,
{
    if opts.follow || opts.all {
        return Err(Error::UsageConflict(
            "viewlast replays a fixed window, -f and -a don't apply".into(),
        ));
    }
    opts.validate()?;
    let overrides = opts.window(resolver)?;
    let filters = Filters::new(&opts.hostname, &opts.tag, &opts.message)?;

    if !state.has_history() {
        return Err(Error::NoHistory);
    }
    let since = overrides.since.unwrap_or(state.last_start);
    let until = overrides.until.unwrap_or(state.last_end);
    tracing::debug!(since, until, "replaying last view");
    presenter.render_window(since, until)?;

    let window = Window {
        since: Some(since),
        until: Some(until),
    };
    let query = Query::bounded(window, filters, opts);
    PollLoop::without_persistence(transport, presenter, query, state.clone())
        .run()
        .await
}
