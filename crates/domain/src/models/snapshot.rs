//! Assignment snapshot domain model.
//!
//! A snapshot freezes the current location → personnel assignment board
//! under an unguessable token. The board is stored exactly as submitted and
//! never references live rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::models::location::LocationType;
use crate::models::personnel::PersonnelType;

/// Display role of a person on the assignment board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayRole {
    #[serde(rename = "قائد فريق")]
    TeamLeader,
    #[serde(rename = "رجل أمن ثاني")]
    SecondGuard,
}

/// Shape a board entry must have. Only used to check the submitted board;
/// the stored copy keeps every key the client sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    pub id: i64,
    pub name: String,
    pub role: DisplayRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub personnel_type: Option<PersonnelType>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Location id → ordered entries.
pub type AssignmentMap = BTreeMap<i64, Vec<AssignmentEntry>>;

/// Shape of a location summary captured at snapshot time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLocation {
    pub id: i64,
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub location_type: LocationType,
    #[serde(default)]
    pub radius: Option<i32>,
}

/// Request payload for creating a snapshot.
///
/// Kept loosely typed so that a malformed board is reported with a precise
/// message instead of a generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSnapshotRequest {
    #[serde(default)]
    pub assignments: Option<Value>,
    #[serde(default)]
    pub locations: Option<Value>,
}

/// Validated snapshot contents, as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPayload {
    pub assignments: Value,
    pub locations: Option<Value>,
}

impl SnapshotPayload {
    /// Number of locations on the board.
    pub fn location_count(&self) -> usize {
        self.assignments.as_object().map_or(0, |board| board.len())
    }
}

impl CreateSnapshotRequest {
    /// Checks that `assignments` is a mapping of location ids to entries and
    /// that `locations`, when present, is a list of location summaries.
    pub fn into_payload(self) -> Result<SnapshotPayload, DomainError> {
        let assignments = match self.assignments {
            Some(value @ Value::Object(_)) => {
                AssignmentMap::deserialize(&value).map_err(|e| {
                    DomainError::Validation(format!("assignments: {}", e))
                })?;
                value
            }
            Some(_) => {
                return Err(DomainError::Validation(
                    "assignments: Assignments must be an object keyed by location id".into(),
                ))
            }
            None => {
                return Err(DomainError::Validation(
                    "assignments: Assignments are required".into(),
                ))
            }
        };

        let locations = match self.locations {
            None | Some(Value::Null) => None,
            Some(value @ Value::Array(_)) => {
                Vec::<SnapshotLocation>::deserialize(&value)
                    .map_err(|e| DomainError::Validation(format!("locations: {}", e)))?;
                Some(value)
            }
            Some(_) => {
                return Err(DomainError::Validation(
                    "locations: Locations must be a list".into(),
                ))
            }
        };

        Ok(SnapshotPayload {
            assignments,
            locations,
        })
    }
}

/// Response payload for a created snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSnapshotResponse {
    pub token: String,
    pub url: String,
}

/// A stored snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSnapshot {
    pub id: i64,
    pub token: String,
    pub assignments: Value,
    pub locations: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Read-only view served to whoever holds the token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub assignments: Value,
    pub locations: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<AssignmentSnapshot> for SnapshotView {
    fn from(snapshot: AssignmentSnapshot) -> Self {
        Self {
            assignments: snapshot.assignments,
            locations: snapshot.locations,
            created_at: snapshot.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board() -> serde_json::Value {
        json!({
            "5": [{"id": 1, "name": "Sara", "role": "قائد فريق"}],
            "7": [
                {"id": 2, "name": "Omar", "role": "رجل أمن ثاني", "phone": "0500000000"},
                {"id": 3, "name": "Huda", "role": "قائد فريق", "personnelType": "traffic"}
            ]
        })
    }

    #[test]
    fn test_payload_parses_board() {
        let request = CreateSnapshotRequest {
            assignments: Some(board()),
            locations: None,
        };
        let payload = request.into_payload().unwrap();
        assert_eq!(payload.location_count(), 2);
        assert_eq!(payload.assignments, board());
        assert!(payload.locations.is_none());

        let parsed = AssignmentMap::deserialize(&payload.assignments).unwrap();
        assert_eq!(parsed[&5][0].role, DisplayRole::TeamLeader);
        assert_eq!(parsed[&7][1].name, "Huda");
    }

    #[test]
    fn test_board_is_kept_as_submitted() {
        let assignments = json!({
            "5": [{
                "id": 1,
                "name": "Sara",
                "role": "قائد فريق",
                "phone": null,
                "notes": null,
                "shift": "night"
            }]
        });
        let locations = json!([{
            "id": 5,
            "name": "Gate 2",
            "latitude": "24.74",
            "longitude": "46.57",
            "locationType": "mixed",
            "radius": null,
            "isActive": true
        }]);
        let request = CreateSnapshotRequest {
            assignments: Some(assignments.clone()),
            locations: Some(locations.clone()),
        };

        let payload = request.into_payload().unwrap();
        assert_eq!(payload.assignments, assignments);
        assert_eq!(payload.locations, Some(locations));
    }

    #[test]
    fn test_assignments_must_be_a_mapping() {
        for bad in [json!([1, 2]), json!("board"), json!(null)] {
            let request = CreateSnapshotRequest {
                assignments: Some(bad),
                locations: None,
            };
            assert!(matches!(
                request.into_payload(),
                Err(DomainError::Validation(_))
            ));
        }

        let missing = CreateSnapshotRequest::default();
        assert!(missing.into_payload().is_err());
    }

    #[test]
    fn test_non_numeric_location_key_is_rejected() {
        let request = CreateSnapshotRequest {
            assignments: Some(json!({"gate": []})),
            locations: None,
        };
        assert!(request.into_payload().is_err());
    }

    #[test]
    fn test_unknown_display_role_is_rejected() {
        let request = CreateSnapshotRequest {
            assignments: Some(json!({"5": [{"id": 1, "name": "Sara", "role": "manager"}]})),
            locations: None,
        };
        assert!(request.into_payload().is_err());
    }

    #[test]
    fn test_locations_are_parsed() {
        let request = CreateSnapshotRequest {
            assignments: Some(json!({})),
            locations: Some(json!([{
                "id": 5,
                "name": "Gate 2",
                "latitude": "24.74",
                "longitude": "46.57",
                "locationType": "mixed"
            }])),
        };
        let payload = request.into_payload().unwrap();
        let locations = Vec::<SnapshotLocation>::deserialize(&payload.locations.unwrap()).unwrap();
        assert_eq!(locations[0].location_type, LocationType::Mixed);
        assert_eq!(locations[0].radius, None);

        let bad_type = CreateSnapshotRequest {
            assignments: Some(json!({})),
            locations: Some(json!([{
                "id": 5,
                "name": "Gate 2",
                "latitude": "24.74",
                "longitude": "46.57",
                "locationType": "castle"
            }])),
        };
        assert!(bad_type.into_payload().is_err());

        let bad = CreateSnapshotRequest {
            assignments: Some(json!({})),
            locations: Some(json!({"id": 5})),
        };
        assert!(bad.into_payload().is_err());
    }
}
