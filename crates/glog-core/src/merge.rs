//! LogMerger — one chronological sequence out of the two entry kinds.
//!
//! Sorting is stable. On equal dates system entries come before custom
//! entries and each kind keeps the order the server sent. Reverse order
//! flips the date comparison only, so the tie-break is the same both ways.

use std::cmp::Reverse;

use crate::types::{CustomLogEntry, MergedLog, SyslogEntry};

pub fn merge(
    sys_logs: Vec<SyslogEntry>,
    custom_logs: Vec<CustomLogEntry>,
    reverse: bool,
) -> Vec<MergedLog> {
    let mut merged: Vec<MergedLog> = Vec::with_capacity(sys_logs.len() + custom_logs.len());
    merged.extend(sys_logs.into_iter().map(MergedLog::from));
    merged.extend(custom_logs.into_iter().map(MergedLog::from));

    if reverse {
        merged.sort_by_key(|log| Reverse(log.date));
    } else {
        merged.sort_by_key(|log| log.date);
    }
    merged
}
