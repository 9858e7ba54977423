//! Domain models for the Security Map backend.

pub mod location;
pub mod personnel;
pub mod snapshot;

pub use location::{Location, LocationType, LocationWithPersonnel};
pub use personnel::{Personnel, PersonnelType};
pub use snapshot::{AssignmentSnapshot, SnapshotView};
