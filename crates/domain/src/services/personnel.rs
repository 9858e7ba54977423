//! Personnel service.

use std::sync::Arc;

use crate::error::DomainError;
use crate::models::personnel::{CreatePersonnelRequest, Personnel, UpdatePersonnelRequest};
use crate::store::{LocationStore, PersonnelStore};

/// CRUD over personnel scoped to a location.
#[derive(Clone)]
pub struct PersonnelService {
    personnel: Arc<dyn PersonnelStore>,
    locations: Arc<dyn LocationStore>,
}

impl PersonnelService {
    pub fn new(personnel: Arc<dyn PersonnelStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self {
            personnel,
            locations,
        }
    }

    async fn ensure_location(&self, location_id: i64) -> Result<(), DomainError> {
        if self.locations.find_by_id(location_id).await?.is_none() {
            tracing::warn!(location_id, "Personnel write references a missing location");
            return Err(DomainError::InvalidReference(format!(
                "Location {} does not exist",
                location_id
            )));
        }
        Ok(())
    }

    /// Personnel attached to a location, oldest first.
    pub async fn list_by_location(&self, location_id: i64) -> Result<Vec<Personnel>, DomainError> {
        self.personnel.list_by_location(location_id).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Personnel>, DomainError> {
        self.personnel.find_by_id(id).await
    }

    pub async fn create(&self, request: CreatePersonnelRequest) -> Result<i64, DomainError> {
        let new_personnel = request.into_new_personnel()?;
        self.ensure_location(new_personnel.location_id).await?;

        let location_id = new_personnel.location_id;
        let id = self.personnel.insert(new_personnel).await?;

        tracing::info!(personnel_id = id, location_id, "Personnel created");
        Ok(id)
    }

    /// Applies a partial update; a new `locationId` is re-validated.
    pub async fn update(&self, id: i64, request: UpdatePersonnelRequest) -> Result<(), DomainError> {
        let patch = request.into_patch()?;
        if let Some(location_id) = patch.location_id {
            if self.personnel.find_by_id(id).await?.is_none() {
                return Err(DomainError::NotFound(format!("Personnel {}", id)));
            }
            self.ensure_location(location_id).await?;
        }
        if !self.personnel.update(id, patch).await? {
            return Err(DomainError::NotFound(format!("Personnel {}", id)));
        }

        tracing::info!(personnel_id = id, "Personnel updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.personnel.delete(id).await? {
            return Err(DomainError::NotFound(format!("Personnel {}", id)));
        }

        tracing::info!(personnel_id = id, "Personnel deleted");
        Ok(())
    }
}
