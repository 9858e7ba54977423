//! Domain services for the Security Map backend.
//!
//! Services validate requests, apply defaults and call the storage traits.

pub mod location;
pub mod personnel;
pub mod snapshot;

pub use location::{LocationService, LocationSettings};
pub use personnel::PersonnelService;
pub use snapshot::{snapshot_url, SnapshotService};
