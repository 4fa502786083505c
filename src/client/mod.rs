//! HTTP client for the UDSC public API
//!
//! - [`http`] - request building and JSON fetching

pub mod http;

pub use http::{ApiClient, API_BASE};
