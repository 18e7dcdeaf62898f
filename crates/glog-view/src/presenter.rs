//! Presenter — writes a merged log sequence as text lines.
//!
//! Line layout: `<stamp> <hostname> <tag> <message>`. An entry the server
//! folded (`count > 1`) is printed once with a `(N x)` suffix, unless raw
//! mode asks for every occurrence on its own line.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{Local, TimeZone};
use glog_core::time::format_stamp;
use glog_core::MergedLog;

use crate::theme::Highlight;

pub struct Presenter<W, Tz: TimeZone = Local> {
    out: W,
    highlight: Highlight,
    raw: bool,
    tz: Tz,
}

impl<W: Write> Presenter<W, Local> {
    pub fn new(out: W, highlight: Highlight, raw: bool) -> Self {
        Self::with_timezone(out, highlight, raw, Local)
    }
}

impl<W, Tz> Presenter<W, Tz>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone(out: W, highlight: Highlight, raw: bool, tz: Tz) -> Self {
        Self {
            out,
            highlight,
            raw,
            tz,
        }
    }

    /// Format epoch seconds the way every printed timestamp looks.
    pub fn stamp(&self, epoch: i64) -> String {
        format_stamp(epoch, &self.tz)
    }

    /// Write `logs`. With `show_banner`, a non-empty sequence is preceded by
    /// its first and last timestamps.
    pub fn render(&mut self, logs: &[MergedLog], show_banner: bool) -> io::Result<()> {
        if show_banner {
            if let (Some(first), Some(last)) = (logs.first(), logs.last()) {
                writeln!(
                    self.out,
                    "----->> {} ------ to ------->> {}",
                    self.highlight.stamp(&self.stamp(first.date)),
                    self.highlight.stamp(&self.stamp(last.date)),
                )?;
                writeln!(self.out)?;
            }
        }

        for log in logs {
            let line = format!(
                "{} {} {} {}",
                self.stamp(log.date),
                log.hostname,
                log.tag,
                log.message
            );
            if log.count > 1 && !self.raw {
                writeln!(self.out, "{line} {}", self.highlight.count(log.count))?;
            } else {
                for _ in 0..log.count {
                    writeln!(self.out, "{line}")?;
                }
            }
        }
        self.out.flush()
    }

    /// Bounds of a replayed window, printed before its entries.
    pub fn render_window(&mut self, start: i64, end: i64) -> io::Result<()> {
        writeln!(self.out, "{} {}", self.stamp(start), self.stamp(end))
    }

    /// Informational line, e.g. the empty-result notice.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
