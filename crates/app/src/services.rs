//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Every operation runs its validators before the single mutating repository
//! call, so a rule violation never leaves a partial write behind.

pub mod battery_service;
pub mod device_service;

#[cfg(test)]
pub(crate) mod in_memory;
