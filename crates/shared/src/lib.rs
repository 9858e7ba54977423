//! Shared utilities and common types for the Security Map backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Secure random token generation
//! - Coordinate, colour and geofence validation
//! - Partial-update (tri-state) deserialization helpers

pub mod crypto;
pub mod patch;
pub mod validation;
