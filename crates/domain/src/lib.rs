//! Domain layer for the Security Map backend.
//!
//! This crate contains:
//! - Domain models (Location, Personnel, AssignmentSnapshot)
//! - The location style codec and geofence geometry helpers
//! - Storage traits and an in-memory store
//! - Business logic services
//! - Domain error types

pub mod error;
pub mod geometry;
pub mod models;
pub mod services;
pub mod store;
pub mod style;

pub use error::DomainError;
