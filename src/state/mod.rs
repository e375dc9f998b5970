//! State module for tracking request progress
//!
//! - `RequestState`: the per-request pipeline states (resolving, cache check,
//!   fetching, parsing, storing) and their terminal outcomes

mod request_state;

pub use request_state::RequestState;
