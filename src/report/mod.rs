//! Reporting: price formatting and terminal/JSON rendering of results.

pub mod format;

pub use format::*;
