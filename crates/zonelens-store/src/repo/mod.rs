//! Repository layer: SQLite implementation of the wall-clock store

pub mod sqlite_store;

pub use sqlite_store::SqliteWallClockStore;
