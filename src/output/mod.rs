//! Output module for rendering pipeline outcomes
//!
//! This module turns typed outcomes into the messages shown to the user:
//! cache hits, fresh results, fetch failures, alias listings and history.

mod report;

pub use report::{render_aliases, render_get, render_history, render_view};
