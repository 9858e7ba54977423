//! Helpers for partial-update payloads.
//!
//! A patch field of type `Option<Option<T>>` distinguishes three states:
//! - `None`: the key was absent, leave the stored value untouched
//! - `Some(None)`: the key was explicitly `null`, clear the stored value
//! - `Some(Some(v))`: replace the stored value with `v`
//!
//! Serde collapses `null` and "absent" into `None` by default, so such fields
//! must be annotated with
//! `#[serde(default, deserialize_with = "shared::patch::double_option")]`.

use serde::{Deserialize, Deserializer};

/// Deserializes a present key (including `null`) into `Some(..)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_absent_key_is_untouched() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.note, None);
    }

    #[test]
    fn test_null_key_clears() {
        let patch: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(patch.note, Some(None));
    }

    #[test]
    fn test_value_key_sets() {
        let patch: Patch = serde_json::from_str(r#"{"note": "gate closed"}"#).unwrap();
        assert_eq!(patch.note, Some(Some("gate closed".to_string())));
    }
}
