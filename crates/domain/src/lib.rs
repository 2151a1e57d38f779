//! # devmon-domain
//!
//! Pure domain model for the devmon device/battery inventory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Devices** (named pieces of hardware with a firmware version and power status)
//! - Define **Batteries** (measured cells that may be attached to at most one device)
//! - Define the sparse **update payloads** and the merge rules that apply them
//! - Contain all invariant enforcement (non-empty names, non-negative measurements,
//!   per-device battery capacity)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;

pub mod battery;
pub mod device;
