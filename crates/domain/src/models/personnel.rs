//! Personnel domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::patch::double_option;
use shared::validation::{validate_not_blank, validate_phone};
use validator::{Validate, ValidateEmail};

use crate::error::DomainError;

/// Duty a person is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonnelType {
    #[default]
    Security,
    Traffic,
}

impl PersonnelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelType::Security => "security",
            PersonnelType::Traffic => "traffic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "security" => Some(PersonnelType::Security),
            "traffic" => Some(PersonnelType::Traffic),
            _ => None,
        }
    }
}

/// A person attached to exactly one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: i64,
    pub location_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub personnel_type: PersonnelType,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a personnel record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonnelRequest {
    pub location_id: Option<i64>,

    #[serde(default)]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[validate(length(max = 255, message = "Role must be at most 255 characters"))]
    pub role: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub personnel_type: Option<PersonnelType>,

    #[validate(length(max = 4000, message = "Notes must be at most 4000 characters"))]
    pub notes: Option<String>,
}

fn check_contact(phone: Option<&str>, email: Option<&str>) -> Result<(), DomainError> {
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|e| DomainError::invalid_field("phone", e))?;
    }
    if let Some(email) = email {
        if !email.validate_email() {
            return Err(DomainError::Validation(
                "email: Invalid email address".into(),
            ));
        }
    }
    Ok(())
}

fn check_location_id(location_id: i64) -> Result<(), DomainError> {
    if location_id <= 0 {
        return Err(DomainError::Validation(
            "locationId: Location id must be positive".into(),
        ));
    }
    Ok(())
}

/// Empty strings for optional contact fields mean "not given".
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CreatePersonnelRequest {
    /// Validates the request and fills in defaults.
    pub fn into_new_personnel(self) -> Result<NewPersonnel, DomainError> {
        self.validate()
            .map_err(|e| DomainError::from_validation(&e))?;

        let location_id = self
            .location_id
            .ok_or_else(|| DomainError::Validation("locationId: Location id is required".into()))?;
        check_location_id(location_id)?;

        validate_not_blank(&self.name).map_err(|e| DomainError::invalid_field("name", e))?;

        let phone = blank_to_none(self.phone);
        let email = blank_to_none(self.email);
        check_contact(phone.as_deref(), email.as_deref())?;

        Ok(NewPersonnel {
            location_id,
            name: self.name.trim().to_string(),
            role: self.role,
            phone,
            email,
            personnel_type: self.personnel_type.unwrap_or_default(),
            notes: self.notes,
        })
    }
}

/// Request payload for a partial personnel update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonnelRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub location_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub personnel_type: Option<Option<PersonnelType>>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdatePersonnelRequest {
    /// Validates the supplied fields and converts them into a storage patch.
    pub fn into_patch(self) -> Result<PersonnelPatch, DomainError> {
        let location_id = match self.location_id {
            Some(None) => {
                return Err(DomainError::Validation(
                    "locationId: Value cannot be null".into(),
                ))
            }
            Some(Some(id)) => {
                check_location_id(id)?;
                Some(id)
            }
            None => None,
        };

        let name = match self.name {
            Some(None) => {
                return Err(DomainError::Validation("name: Value cannot be null".into()))
            }
            Some(Some(name)) => {
                validate_not_blank(&name).map_err(|e| DomainError::invalid_field("name", e))?;
                Some(name.trim().to_string())
            }
            None => None,
        };

        let personnel_type = match self.personnel_type {
            Some(None) => {
                return Err(DomainError::Validation(
                    "personnelType: Value cannot be null".into(),
                ))
            }
            other => other.flatten(),
        };

        let phone = self.phone.map(blank_to_none);
        let email = self.email.map(blank_to_none);
        check_contact(
            phone.as_ref().and_then(|p| p.as_deref()),
            email.as_ref().and_then(|e| e.as_deref()),
        )?;

        Ok(PersonnelPatch {
            location_id,
            name,
            role: self.role,
            phone,
            email,
            personnel_type,
            notes: self.notes,
        })
    }
}

/// A validated personnel record ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPersonnel {
    pub location_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub personnel_type: PersonnelType,
    pub notes: Option<String>,
}

/// A validated partial update for a personnel record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonnelPatch {
    pub location_id: Option<i64>,
    pub name: Option<String>,
    pub role: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub personnel_type: Option<PersonnelType>,
    pub notes: Option<Option<String>>,
}

impl PersonnelPatch {
    /// Applies the patch to an in-memory record. Does not touch `updated_at`.
    pub fn apply_to(&self, personnel: &mut Personnel) {
        if let Some(location_id) = self.location_id {
            personnel.location_id = location_id;
        }
        if let Some(name) = &self.name {
            personnel.name = name.clone();
        }
        if let Some(role) = &self.role {
            personnel.role = role.clone();
        }
        if let Some(phone) = &self.phone {
            personnel.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            personnel.email = email.clone();
        }
        if let Some(personnel_type) = self.personnel_type {
            personnel.personnel_type = personnel_type;
        }
        if let Some(notes) = &self.notes {
            personnel.notes = notes.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_to_security() {
        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"locationId": 4, "name": "Ali"})).unwrap();
        let new = request.into_new_personnel().unwrap();
        assert_eq!(new.personnel_type, PersonnelType::Security);
        assert_eq!(new.location_id, 4);
        assert_eq!(new.role, None);
    }

    #[test]
    fn test_create_trims_name() {
        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"locationId": 4, "name": "  Ali "})).unwrap();
        assert_eq!(request.into_new_personnel().unwrap().name, "Ali");
    }

    #[test]
    fn test_create_requires_location_and_name() {
        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"name": "Ali"})).unwrap();
        assert!(request.into_new_personnel().is_err());

        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"locationId": 4, "name": " "})).unwrap();
        assert!(request.into_new_personnel().is_err());

        let request: CreatePersonnelRequest =
            serde_json::from_value(json!({"locationId": 0, "name": "Ali"})).unwrap();
        assert!(request.into_new_personnel().is_err());
    }

    #[test]
    fn test_create_validates_contact_loosely() {
        let request: CreatePersonnelRequest = serde_json::from_value(json!({
            "locationId": 4,
            "name": "Ali",
            "phone": "+966 50 123 4567",
            "email": "ali@example.com"
        }))
        .unwrap();
        assert!(request.into_new_personnel().is_ok());

        let request: CreatePersonnelRequest = serde_json::from_value(json!({
            "locationId": 4,
            "name": "Ali",
            "email": "not-an-email"
        }))
        .unwrap();
        assert_eq!(
            request.into_new_personnel().unwrap_err(),
            DomainError::Validation("email: Invalid email address".into())
        );

        let request: CreatePersonnelRequest = serde_json::from_value(json!({
            "locationId": 4,
            "name": "Ali",
            "phone": "",
            "email": ""
        }))
        .unwrap();
        let new = request.into_new_personnel().unwrap();
        assert_eq!(new.phone, None);
        assert_eq!(new.email, None);
    }

    #[test]
    fn test_unknown_personnel_type_is_rejected() {
        let result = serde_json::from_value::<CreatePersonnelRequest>(json!({
            "locationId": 4,
            "name": "Ali",
            "personnelType": "medic"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_patch() {
        let request: UpdatePersonnelRequest =
            serde_json::from_value(json!({"role": null, "phone": "0501234567"})).unwrap();
        let patch = request.into_patch().unwrap();
        assert_eq!(patch.role, Some(None));
        assert_eq!(patch.phone, Some(Some("0501234567".into())));
        assert_eq!(patch.location_id, None);
        assert_eq!(patch.personnel_type, None);
    }

    #[test]
    fn test_update_rejects_null_location() {
        let request: UpdatePersonnelRequest =
            serde_json::from_value(json!({"locationId": null})).unwrap();
        assert!(request.into_patch().is_err());
    }

    #[test]
    fn test_personnel_serializes_camel_case() {
        let now = Utc::now();
        let personnel = Personnel {
            id: 1,
            location_id: 2,
            name: "Sara".into(),
            role: Some("Supervisor".into()),
            phone: None,
            email: None,
            personnel_type: PersonnelType::Traffic,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&personnel).unwrap();
        assert_eq!(json["locationId"], 2);
        assert_eq!(json["personnelType"], "traffic");
        assert_eq!(json["phone"], serde_json::Value::Null);
    }
}
