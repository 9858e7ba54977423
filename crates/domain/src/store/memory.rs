//! In-memory store for development and testing.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{LocationStore, PersonnelStore, SnapshotStore, StoreHealth};
use crate::error::DomainError;
use crate::models::location::{ListOrder, Location, LocationPatch, NewLocation};
use crate::models::personnel::{NewPersonnel, Personnel, PersonnelPatch};
use crate::models::snapshot::{AssignmentSnapshot, SnapshotPayload};

#[derive(Debug, Default)]
struct Tables {
    locations: BTreeMap<i64, Location>,
    personnel: BTreeMap<i64, Personnel>,
    snapshots: BTreeMap<String, AssignmentSnapshot>,
    next_location_id: i64,
    next_personnel_id: i64,
    next_snapshot_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Store that keeps every table in process memory.
///
/// Mirrors the relational rules of the PostgreSQL schema: personnel must
/// reference an existing location and are removed with it. Clones share
/// the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    /// Whether every call fails as if storage were unreachable.
    pub simulate_outage: bool,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails with `StorageUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            simulate_outage: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.simulate_outage {
            tracing::warn!("In-memory store simulating outage");
            return Err(DomainError::StorageUnavailable(
                "simulated storage outage".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn list(&self, order: ListOrder) -> Result<Vec<Location>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut locations: Vec<Location> = tables.locations.values().cloned().collect();
        if order == ListOrder::NewestFirst {
            locations.reverse();
        }
        Ok(locations)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.locations.get(&id).cloned())
    }

    async fn insert(&self, location: NewLocation) -> Result<i64, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_location_id);
        let now = Utc::now();
        tables.locations.insert(
            id,
            Location {
                id,
                name: location.name,
                description: location.description,
                latitude: location.latitude,
                longitude: location.longitude,
                location_type: location.location_type,
                radius: location.radius,
                is_active: location.is_active,
                style: location.style,
                notes: location.notes,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, patch: LocationPatch) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.locations.get_mut(&id) {
            Some(location) => {
                patch.apply_to(location);
                location.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.locations.remove(&id).is_none() {
            return Ok(false);
        }
        tables.personnel.retain(|_, p| p.location_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PersonnelStore for InMemoryStore {
    async fn list_by_location(&self, location_id: i64) -> Result<Vec<Personnel>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .personnel
            .values()
            .filter(|p| p.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Personnel>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.personnel.get(&id).cloned())
    }

    async fn insert(&self, personnel: NewPersonnel) -> Result<i64, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.locations.contains_key(&personnel.location_id) {
            return Err(DomainError::InvalidReference(format!(
                "Location {} does not exist",
                personnel.location_id
            )));
        }
        let id = next_id(&mut tables.next_personnel_id);
        let now = Utc::now();
        tables.personnel.insert(
            id,
            Personnel {
                id,
                location_id: personnel.location_id,
                name: personnel.name,
                role: personnel.role,
                phone: personnel.phone,
                email: personnel.email,
                personnel_type: personnel.personnel_type,
                notes: personnel.notes,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, patch: PersonnelPatch) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if let Some(location_id) = patch.location_id {
            if !tables.locations.contains_key(&location_id) {
                return Err(DomainError::InvalidReference(format!(
                    "Location {} does not exist",
                    location_id
                )));
            }
        }
        match tables.personnel.get_mut(&id) {
            Some(personnel) => {
                patch.apply_to(personnel);
                personnel.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.tables.write().await.personnel.remove(&id).is_some())
    }
}

#[async_trait]
impl SnapshotStore for InMemoryStore {
    async fn insert(
        &self,
        token: &str,
        payload: SnapshotPayload,
    ) -> Result<AssignmentSnapshot, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.snapshots.contains_key(token) {
            return Err(DomainError::StorageUnavailable(
                "duplicate snapshot token".to_string(),
            ));
        }
        let snapshot = AssignmentSnapshot {
            id: next_id(&mut tables.next_snapshot_id),
            token: token.to_string(),
            assignments: payload.assignments,
            locations: payload.locations,
            created_at: Utc::now(),
        };
        tables.snapshots.insert(token.to_string(), snapshot.clone());
        Ok(snapshot)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<AssignmentSnapshot>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.snapshots.get(token).cloned())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}
