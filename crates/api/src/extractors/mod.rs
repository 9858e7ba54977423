//! Custom Axum extractors.

pub mod base_url;
pub mod json;

pub use base_url::ShareBaseUrl;
pub use json::AppJson;
