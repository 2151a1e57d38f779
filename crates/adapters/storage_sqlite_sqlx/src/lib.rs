//! # devmon-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `devmon-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `devmon-app` (for port traits) and `devmon-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod battery_repo;
mod device_repo;
mod error;
mod pool;

pub use battery_repo::SqliteBatteryRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
