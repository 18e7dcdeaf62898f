//! glog-view — terminal output for glog.

pub mod presenter;
pub mod theme;

pub use presenter::Presenter;
pub use theme::Highlight;
