//! Client library for the Meridian content search API.
//!
//! Two layers:
//!
//! - [`ApiClient`] - a thin typed HTTP client for the search endpoints
//! - [`SearchController`] - the interactive state machine that owns query,
//!   debounce, pagination, and error state for one search surface
//!
//! The controller is transport-agnostic: it emits [`SearchRequest`]s from
//! `poll` and consumes outcomes through `apply`, so UI event loops decide
//! when to tick it and tests can drive it without a network.

mod client;
mod controller;
mod filters;
mod types;

pub use client::*;
pub use controller::*;
pub use filters::*;
pub use types::*;
