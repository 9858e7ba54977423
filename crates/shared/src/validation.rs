//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// Upper bound for a geofence radius in meters.
pub const MAX_RADIUS_METERS: i32 = 50_000;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Parses a coordinate kept as text into a finite number.
pub fn parse_coordinate(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && !trimmed.is_empty() => Ok(value),
        _ => {
            let mut err = ValidationError::new("coordinate_format");
            err.message = Some("Coordinate must be a finite decimal number".into());
            Err(err)
        }
    }
}

/// Validates a latitude given as exact text.
pub fn validate_latitude_text(text: &str) -> Result<(), ValidationError> {
    parse_coordinate(text).and_then(validate_latitude)
}

/// Validates a longitude given as exact text.
pub fn validate_longitude_text(text: &str) -> Result<(), ValidationError> {
    parse_coordinate(text).and_then(validate_longitude)
}

/// Validates that a geofence radius is positive and not absurdly large.
pub fn validate_radius(radius: i32) -> Result<(), ValidationError> {
    if (1..=MAX_RADIUS_METERS).contains(&radius) {
        Ok(())
    } else {
        let mut err = ValidationError::new("radius_range");
        err.message = Some(
            format!("Radius must be between 1 and {} meters", MAX_RADIUS_METERS).into(),
        );
        Err(err)
    }
}

/// Validates that a text value is not empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Loosely validates a phone number: digits plus common separators, 3 to 32 characters.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if allowed && digits >= 3 && trimmed.len() <= 32 {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number contains invalid characters".into());
        Err(err)
    }
}

/// Validates a `#RGB` or `#RRGGBB` colour.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Colour must be a hex value like #0066ff".into());
        Err(err)
    }
}

/// Validates that an opacity is within 0 to 1.
pub fn validate_opacity(opacity: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        let mut err = ValidationError::new("opacity_range");
        err.message = Some("Opacity must be between 0 and 1".into());
        Err(err)
    }
}

/// Validates that a stroke width is a non-negative finite number.
pub fn validate_stroke_width(width: f64) -> Result<(), ValidationError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("stroke_width_range");
        err.message = Some("Stroke width must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-90.1).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.1).is_err());
        assert!(validate_longitude(-180.1).is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("24.7423").unwrap(), 24.7423);
        assert_eq!(parse_coordinate(" 46.5733 ").unwrap(), 46.5733);
        assert_eq!(parse_coordinate("-0.5").unwrap(), -0.5);
        assert!(parse_coordinate("").is_err());
        assert!(parse_coordinate("north").is_err());
        assert!(parse_coordinate("NaN").is_err());
        assert!(parse_coordinate("inf").is_err());
    }

    #[test]
    fn test_coordinate_text_ranges() {
        assert!(validate_latitude_text("24.74").is_ok());
        assert!(validate_latitude_text("91").is_err());
        assert!(validate_longitude_text("46.57").is_ok());
        assert!(validate_longitude_text("-181").is_err());
    }

    #[test]
    fn test_coordinate_error_message() {
        let err = parse_coordinate("abc").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Coordinate must be a finite decimal number"
        );
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(1).is_ok());
        assert!(validate_radius(50).is_ok());
        assert!(validate_radius(MAX_RADIUS_METERS).is_ok());
        assert!(validate_radius(0).is_err());
        assert!(validate_radius(-10).is_err());
        assert!(validate_radius(MAX_RADIUS_METERS + 1).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Gate 1").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+966 50 123 4567").is_ok());
        assert!(validate_phone("(011) 555-0100").is_ok());
        assert!(validate_phone("050").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
        assert!(validate_phone(&"1".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#0066ff").is_ok());
        assert!(validate_hex_color("#FFF").is_ok());
        assert!(validate_hex_color("0066ff").is_err());
        assert!(validate_hex_color("#0066f").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
        assert!(validate_hex_color("blue").is_err());
    }

    #[test]
    fn test_validate_opacity() {
        assert!(validate_opacity(0.0).is_ok());
        assert!(validate_opacity(0.25).is_ok());
        assert!(validate_opacity(1.0).is_ok());
        assert!(validate_opacity(1.01).is_err());
        assert!(validate_opacity(-0.1).is_err());
        assert!(validate_opacity(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_stroke_width() {
        assert!(validate_stroke_width(0.0).is_ok());
        assert!(validate_stroke_width(2.0).is_ok());
        assert!(validate_stroke_width(-1.0).is_err());
        assert!(validate_stroke_width(f64::INFINITY).is_err());
    }
}
