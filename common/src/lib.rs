//! AgriVision shared logic – data model, API client and the UI state
//! machines behind the web front end.
//!
//! Everything here is free of browser bindings so it builds for both the
//! WASM client and the SSR server, and can be tested natively.

pub mod api;
pub mod config;
pub mod contact;
pub mod detect;
pub mod error;
pub mod insights;
pub mod model;
pub mod report;
pub mod theme;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_http;
