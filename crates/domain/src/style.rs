//! Location style codec.
//!
//! A location's circle style is persisted as compact JSON text in its own
//! column. Older rows may hold free-form prose in that column, so decoding
//! never fails: anything that is not an encoded style decodes to the empty
//! style.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fill colour used by the map editor when a location has none.
pub const DEFAULT_FILL_COLOR: &str = "#0066ff";
/// Fill opacity used by the map editor when a location has none.
pub const DEFAULT_FILL_OPACITY: f64 = 0.25;
/// Stroke colour used by the map editor when a location has none.
pub const DEFAULT_STROKE_COLOR: &str = "#001533";
/// Stroke width used by the map editor when a location has none.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Visual style of a location's geofence circle.
///
/// Every field is optional; an all-`None` style is the empty style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_enabled: Option<bool>,
}

/// A style with every field filled in, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_enabled: bool,
}

impl LocationStyle {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &LocationStyle::default()
    }

    /// Checks colours, opacity and stroke width.
    pub fn validate(&self) -> Result<(), DomainError> {
        use shared::validation::{validate_hex_color, validate_opacity, validate_stroke_width};

        if let Some(color) = &self.fill_color {
            validate_hex_color(color)
                .map_err(|e| DomainError::invalid_field("style.fillColor", e))?;
        }
        if let Some(color) = &self.stroke_color {
            validate_hex_color(color)
                .map_err(|e| DomainError::invalid_field("style.strokeColor", e))?;
        }
        if let Some(opacity) = self.fill_opacity {
            validate_opacity(opacity)
                .map_err(|e| DomainError::invalid_field("style.fillOpacity", e))?;
        }
        if let Some(width) = self.stroke_width {
            validate_stroke_width(width)
                .map_err(|e| DomainError::invalid_field("style.strokeWidth", e))?;
        }
        Ok(())
    }

    /// Fills unset fields with the editor defaults.
    pub fn resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            fill_color: self
                .fill_color
                .clone()
                .unwrap_or_else(|| DEFAULT_FILL_COLOR.to_string()),
            fill_opacity: self.fill_opacity.unwrap_or(DEFAULT_FILL_OPACITY),
            stroke_color: self
                .stroke_color
                .clone()
                .unwrap_or_else(|| DEFAULT_STROKE_COLOR.to_string()),
            stroke_width: self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            stroke_enabled: self.stroke_enabled.unwrap_or(true),
        }
    }
}

/// Serializes a style into its compact text form.
pub fn encode(style: &LocationStyle) -> String {
    serde_json::to_string(style).unwrap_or_else(|_| "{}".to_string())
}

/// Parses the text form back into a style.
///
/// Absent, empty or malformed input (including plain prose) yields the
/// empty style.
pub fn decode(text: Option<&str>) -> LocationStyle {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return LocationStyle::default();
    };

    match serde_json::from_str::<LocationStyle>(text) {
        Ok(style) => style,
        Err(err) => {
            tracing::debug!(error = %err, "Stored style is not an encoded style, using empty style");
            LocationStyle::default()
        }
    }
}

/// Encodes a style for storage, mapping the empty style to `None`.
pub fn encode_for_storage(style: &LocationStyle) -> Option<String> {
    if style.is_empty() {
        None
    } else {
        Some(encode(style))
    }
}
