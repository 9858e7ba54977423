//! HTTP route handlers.

use serde::Serialize;

pub mod geofence;
pub mod health;
pub mod locations;
pub mod map_config;
pub mod personnel;
pub mod rpc;
pub mod snapshots;

/// Body returned by create operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdResponse {
    pub id: i64,
}

/// Body returned by update and delete operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl Default for OkResponse {
    fn default() -> Self {
        Self { ok: true }
    }
}
