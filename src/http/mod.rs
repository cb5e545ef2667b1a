//! HTTP surface of the proxy
//!
//! Router and handlers for the two avatar operations, CORS headers, and
//! the error-to-response mapping.

pub mod api;
pub mod cors;
pub mod response;

pub use api::{create_router, AppState};
