//! Assignment snapshot service.
//!
//! The token is the only capability needed to read a snapshot; reads are
//! not authenticated and tokens do not expire.

use std::sync::Arc;

use shared::crypto::generate_share_token;

use crate::error::DomainError;
use crate::models::snapshot::{CreateSnapshotRequest, CreateSnapshotResponse, SnapshotView};
use crate::store::SnapshotStore;

/// Builds the public viewer link for a snapshot token.
pub fn snapshot_url(base_url: &str, token: &str) -> String {
    format!("{}/view/s/{}", base_url.trim_end_matches('/'), token)
}

/// Creates and serves read-only assignment snapshots.
#[derive(Clone)]
pub struct SnapshotService {
    snapshots: Arc<dyn SnapshotStore>,
}

impl SnapshotService {
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self { snapshots }
    }

    /// Validates and stores the board verbatim, returning its token and link.
    ///
    /// Nothing is written when the board is malformed or the random source
    /// fails.
    pub async fn create(
        &self,
        request: CreateSnapshotRequest,
        base_url: &str,
    ) -> Result<CreateSnapshotResponse, DomainError> {
        let payload = request.into_payload().map_err(|e| {
            tracing::warn!(error = %e, "Rejected snapshot");
            e
        })?;
        let token = generate_share_token().map_err(|e| {
            tracing::error!(error = %e, "Failed to generate snapshot token");
            DomainError::from(e)
        })?;

        let location_count = payload.location_count();
        let snapshot = self.snapshots.insert(&token, payload).await?;

        tracing::info!(
            snapshot_id = snapshot.id,
            locations = location_count,
            "Assignment snapshot created"
        );

        Ok(CreateSnapshotResponse {
            url: snapshot_url(base_url, &snapshot.token),
            token: snapshot.token,
        })
    }

    /// The snapshot behind `token`, or `None` when the token is unknown.
    pub async fn get(&self, token: &str) -> Result<Option<SnapshotView>, DomainError> {
        Ok(self
            .snapshots
            .find_by_token(token)
            .await?
            .map(SnapshotView::from))
    }
}
