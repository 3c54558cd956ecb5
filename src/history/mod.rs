//! Scan history browsing.

mod age;
mod browser;
mod window;

pub use age::relative_age;
pub use browser::{DEFAULT_HISTORY_LIMIT, FetchOutcome, HistoryBrowser, HistorySnapshot};
pub use window::{EmptyState, PageWindow};
