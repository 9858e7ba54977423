//! HTTP layer of the Security Map backend: configuration, middleware,
//! REST routes and the RPC facade.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
