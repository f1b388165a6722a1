//! zonelens store - SQLite persistence and seed import
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - `SqliteWallClockStore`, a zone-naive implementation of `WallClockStore`
//! - Seed Format v0 parser and importer for fixture rows and scenario suites

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteWallClockStore;
