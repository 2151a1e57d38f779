//! # devmon-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>` — generic CRUD over any [`Record`](devmon_domain::record::Record)
//!   - `DeviceRepository` — adds lookup by name and detach-on-delete
//!   - `BatteryRepository` — the battery flavour of the generic contract
//! - Provide the **validators** every mutation runs first (existence, name
//!   uniqueness, per-device battery capacity)
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — list, create, get, update, remove
//!   - `BatteryService` — list, create, get, update, remove
//!
//! ## Dependency rule
//! Depends on `devmon-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod validators;
