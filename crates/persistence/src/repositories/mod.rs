//! Repository implementations for database operations.

pub mod health;
pub mod location;
pub mod personnel;
pub mod snapshot;

pub use health::PostgresHealth;
pub use location::LocationRepository;
pub use personnel::PersonnelRepository;
pub use snapshot::SnapshotRepository;
