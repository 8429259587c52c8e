//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed target store using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteTargetStore;
