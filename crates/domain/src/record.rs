//! The [`Record`] trait: what every persisted entity exposes to the
//! generic repository port and the validators.

use std::fmt;

/// A persisted entity with a typed primary key and a sparse update payload.
pub trait Record: Clone + Send + Sync + 'static {
    /// Primary key type.
    type Id: Copy + Eq + fmt::Display + Send + Sync + 'static;

    /// Partial-update payload: every field optional, only present ones applied.
    type Update: Send + 'static;

    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    /// The record's primary key.
    fn id(&self) -> Self::Id;

    /// Overwrite the fields present in `update`, leaving every other field as is.
    fn apply(&mut self, update: Self::Update);
}
