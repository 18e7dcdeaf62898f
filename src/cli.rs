//! Command-line surface. Parsing only; every rule about which options may
//! be combined lives in [`glog_core::ViewOptions::validate`].

use clap::{Args, Parser, Subcommand};
use glog_core::state::DEFAULT_STATE_NAME;
use glog_core::ViewOptions;

#[derive(Parser, Debug)]
#[command(name = "glog", version, about = "Tail logs from a remote glog aggregation service")]
pub struct Cli {
    /// State file under ~/.config/glog (".json" is appended when missing).
    #[arg(short = 'C', long = "config", default_value = DEFAULT_STATE_NAME, global = true)]
    pub config: String,

    /// Write debug logs to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// View logs since the last view, or since a given time.
    View(ViewArgs),
    /// View the logs between the timestamps of the last view again.
    #[command(visible_aliases = ["vl", "last"])]
    Viewlast(ViewLastArgs),
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only logs from these hostnames (negate the set with ! before the first element).
    #[arg(short = 'H', long = "hostname")]
    pub hostname: Vec<String>,

    /// Only logs with these tags (negate the set with ! before the first element).
    #[arg(short = 'T', long = "tag")]
    pub tag: Vec<String>,

    /// Only logs whose message contains these keywords (negate the set with ! before the first element).
    #[arg(short = 'M', long = "message")]
    pub message: Vec<String>,

    /// A log matches if any filter matches, instead of all of them.
    #[arg(short = 'o', long = "or")]
    pub or: bool,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// View logs raw: repeated entries are printed once per occurrence.
    #[arg(long)]
    pub raw: bool,

    /// Don't ask for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Don't colour the output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// View logs since a point in time ("10m", "2h", "Jan  2 15:04:05", ...).
    #[arg(short = 's', long)]
    pub since: Option<String>,

    /// View logs until a point in time.
    #[arg(short = 'u', long)]
    pub until: Option<String>,

    /// View everything from the beginning.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Keep following new logs.
    #[arg(short = 'f', long)]
    pub follow: bool,

    /// View in reversed order.
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Show at most n logs.
    #[arg(short = 'n', long = "nums")]
    pub nums: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub struct ViewLastArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Override the start of the replayed window.
    #[arg(short = 's', long)]
    pub since: Option<String>,

    /// Override the end of the replayed window.
    #[arg(short = 'u', long)]
    pub until: Option<String>,

    /// View in reversed order.
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Show at most n logs.
    #[arg(short = 'n', long = "nums")]
    pub nums: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ViewArgs {
    pub fn options(&self) -> ViewOptions {
        ViewOptions {
            since: self.since.clone().unwrap_or_default(),
            until: self.until.clone().unwrap_or_default(),
            all: self.all,
            hostname: self.filters.hostname.clone(),
            tag: self.filters.tag.clone(),
            message: self.filters.message.clone(),
            filter_or: self.filters.or,
            limit: self.nums,
            reverse: self.reverse,
            follow: self.follow,
            raw: self.output.raw,
        }
    }
}

impl ViewLastArgs {
    pub fn options(&self) -> ViewOptions {
        ViewOptions {
            since: self.since.clone().unwrap_or_default(),
            until: self.until.clone().unwrap_or_default(),
            hostname: self.filters.hostname.clone(),
            tag: self.filters.tag.clone(),
            message: self.filters.message.clone(),
            filter_or: self.filters.or,
            limit: self.nums,
            reverse: self.reverse,
            raw: self.output.raw,
            ..Default::default()
        }
    }
}
