//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod location;
pub mod personnel;
pub mod snapshot;

pub use location::LocationEntity;
pub use personnel::PersonnelEntity;
pub use snapshot::SnapshotEntity;
