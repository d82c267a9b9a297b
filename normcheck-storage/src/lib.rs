//! SQLite persistence for Normcheck.
//!
//! A single write-serialized connection plus a small pool of read-only
//! connections, `PRAGMA user_version` migrations, one query module per
//! table, and [`store::SqliteStore`] implementing the core storage
//! traits.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::DatabaseManager;
pub use store::SqliteStore;
