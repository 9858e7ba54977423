//! Location service.

use std::sync::Arc;

use crate::error::DomainError;
use crate::geometry::GeofenceShape;
use crate::models::location::{
    CreateLocationRequest, GeofencePreviewRequest, ListOrder, Location, LocationWithPersonnel,
    UpdateLocationRequest,
};
use crate::store::{LocationStore, PersonnelStore};

/// Defaults applied by the location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSettings {
    pub default_radius_meters: i32,
    pub list_order: ListOrder,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            default_radius_meters: 100,
            list_order: ListOrder::NewestFirst,
        }
    }
}

/// CRUD over locations, plus geofence rendering.
#[derive(Clone)]
pub struct LocationService {
    locations: Arc<dyn LocationStore>,
    personnel: Arc<dyn PersonnelStore>,
    settings: LocationSettings,
}

impl LocationService {
    pub fn new(
        locations: Arc<dyn LocationStore>,
        personnel: Arc<dyn PersonnelStore>,
        settings: LocationSettings,
    ) -> Self {
        Self {
            locations,
            personnel,
            settings,
        }
    }

    pub fn settings(&self) -> LocationSettings {
        self.settings
    }

    /// All locations in the configured order.
    pub async fn list(&self) -> Result<Vec<Location>, DomainError> {
        self.locations.list(self.settings.list_order).await
    }

    /// A location with its personnel, or `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<LocationWithPersonnel>, DomainError> {
        let Some(location) = self.locations.find_by_id(id).await? else {
            return Ok(None);
        };
        let personnel = self.personnel.list_by_location(id).await?;
        Ok(Some(LocationWithPersonnel {
            location,
            personnel,
        }))
    }

    pub async fn create(&self, request: CreateLocationRequest) -> Result<i64, DomainError> {
        let new_location = request
            .into_new_location(self.settings.default_radius_meters)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected location create");
                e
            })?;
        let location_type = new_location.location_type;
        let id = self.locations.insert(new_location).await?;

        tracing::info!(location_id = id, location_type = %location_type, "Location created");
        Ok(id)
    }

    /// Applies a partial update. Unknown ids fail with `NotFound`.
    pub async fn update(&self, id: i64, request: UpdateLocationRequest) -> Result<(), DomainError> {
        let patch = request.into_patch().map_err(|e| {
            tracing::warn!(location_id = id, error = %e, "Rejected location update");
            e
        })?;
        if !self.locations.update(id, patch).await? {
            return Err(DomainError::NotFound(format!("Location {}", id)));
        }

        tracing::info!(location_id = id, "Location updated");
        Ok(())
    }

    /// Deletes a location and, by cascade, its personnel.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.locations.delete(id).await? {
            return Err(DomainError::NotFound(format!("Location {}", id)));
        }

        tracing::info!(location_id = id, "Location deleted");
        Ok(())
    }

    /// Geofence circle of a stored location.
    pub async fn geofence(&self, id: i64, zoom: Option<f64>) -> Result<GeofenceShape, DomainError> {
        let location = self
            .locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Location {}", id)))?;
        location.geofence(self.settings.default_radius_meters, zoom)
    }

    /// Geofence circle of an unsaved draft.
    pub fn preview(&self, request: &GeofencePreviewRequest) -> Result<GeofenceShape, DomainError> {
        request.shape(self.settings.default_radius_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::LocationType;
    use crate::models::personnel::CreatePersonnelRequest;
    use crate::services::PersonnelService;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn service(store: &InMemoryStore) -> LocationService {
        let store = Arc::new(store.clone());
        LocationService::new(store.clone(), store, LocationSettings::default())
    }

    fn gate_request() -> CreateLocationRequest {
        serde_json::from_value(json!({
            "name": "Gate 1",
            "description": "Main entrance",
            "latitude": "24.7423",
            "longitude": "46.5733",
            "locationType": "security",
            "radius": 50,
            "style": {"fillColor": "#ff0000", "strokeEnabled": false},
            "notes": "Open 24h"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let id = service.create(gate_request()).await.unwrap();
        let found = service.get_by_id(id).await.unwrap().unwrap();
        let location = found.location;

        assert_eq!(location.id, id);
        assert_eq!(location.name, "Gate 1");
        assert_eq!(location.description.as_deref(), Some("Main entrance"));
        assert_eq!(location.latitude, "24.7423");
        assert_eq!(location.longitude, "46.5733");
        assert_eq!(location.location_type, LocationType::Security);
        assert_eq!(location.radius, Some(50));
        assert!(location.is_active);
        assert_eq!(location.style.fill_color.as_deref(), Some("#ff0000"));
        assert_eq!(location.style.stroke_enabled, Some(false));
        assert_eq!(location.notes.as_deref(), Some("Open 24h"));
        assert!(found.personnel.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryStore::new();
        assert!(service(&store).get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_field() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let id = service.create(gate_request()).await.unwrap();
        let before = service.get_by_id(id).await.unwrap().unwrap().location;

        let request: UpdateLocationRequest =
            serde_json::from_value(json!({"radius": 75})).unwrap();
        service.update(id, request).await.unwrap();

        let mut after = service.get_by_id(id).await.unwrap().unwrap().location;
        assert_eq!(after.radius, Some(75));
        assert!(after.updated_at >= before.updated_at);

        after.radius = before.radius;
        after.updated_at = before.updated_at;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_update_null_clears_nullable_field() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let id = service.create(gate_request()).await.unwrap();

        let request: UpdateLocationRequest =
            serde_json::from_value(json!({"description": null, "style": null})).unwrap();
        service.update(id, request).await.unwrap();

        let location = service.get_by_id(id).await.unwrap().unwrap().location;
        assert_eq!(location.description, None);
        assert!(location.style.is_empty());
        assert_eq!(location.notes.as_deref(), Some("Open 24h"));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_is_not_found() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let err = service
            .update(7, UpdateLocationRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound("Location 7".into()));

        let err = service.delete(7).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Location 7".into()));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_personnel() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let shared = Arc::new(store.clone());
        let personnel = PersonnelService::new(shared.clone(), shared);

        let id = service.create(gate_request()).await.unwrap();
        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"locationId": id, "name": "Ali"})).unwrap();
        let ali = personnel.create(request).await.unwrap();

        service.delete(id).await.unwrap();

        assert!(service.get_by_id(id).await.unwrap().is_none());
        assert!(personnel.list_by_location(id).await.unwrap().is_empty());
        assert!(personnel.get_by_id(ali).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_propagates_outage() {
        let store = InMemoryStore::unavailable();
        let err = service(&store).list().await.unwrap_err();
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_geofence_uses_stored_radius() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let id = service.create(gate_request()).await.unwrap();

        let shape = service.geofence(id, Some(15.0)).await.unwrap();
        assert_eq!(shape.radius_meters, 50.0);
        assert!(shape.pixel_radius.is_some());

        assert!(matches!(
            service.geofence(id + 1, None).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
