//! Persistence layer for the Security Map backend.
//!
//! This crate contains:
//! - Database connection management and versioned migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain storage traits
//! - Query metrics

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
