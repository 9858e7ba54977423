//! Storage traits.
//!
//! Services depend on these traits only. The persistence crate implements
//! them over PostgreSQL; [`InMemoryStore`] implements them for development
//! and tests.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::models::location::{ListOrder, Location, LocationPatch, NewLocation};
use crate::models::personnel::{NewPersonnel, Personnel, PersonnelPatch};
use crate::models::snapshot::{AssignmentSnapshot, SnapshotPayload};

/// Location persistence.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// All locations in the requested order.
    async fn list(&self, order: ListOrder) -> Result<Vec<Location>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, DomainError>;

    /// Inserts a location and returns its id.
    async fn insert(&self, location: NewLocation) -> Result<i64, DomainError>;

    /// Applies a patch and refreshes `updated_at`. Returns false when the id is unknown.
    async fn update(&self, id: i64, patch: LocationPatch) -> Result<bool, DomainError>;

    /// Deletes a location and its personnel. Returns false when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Personnel persistence.
///
/// Writes referencing a missing location fail with
/// [`DomainError::InvalidReference`].
#[async_trait]
pub trait PersonnelStore: Send + Sync {
    async fn list_by_location(&self, location_id: i64) -> Result<Vec<Personnel>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Personnel>, DomainError>;

    async fn insert(&self, personnel: NewPersonnel) -> Result<i64, DomainError>;

    async fn update(&self, id: i64, patch: PersonnelPatch) -> Result<bool, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Snapshot persistence. Snapshots are write-once.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn insert(
        &self,
        token: &str,
        payload: SnapshotPayload,
    ) -> Result<AssignmentSnapshot, DomainError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<AssignmentSnapshot>, DomainError>;
}

/// Connectivity probe used by health checks.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
