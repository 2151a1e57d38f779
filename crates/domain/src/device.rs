//! Device — a named piece of hardware that batteries can be attached to.

use serde::{Deserialize, Serialize};

use crate::battery::Battery;
use crate::error::{DevmonError, ValidationError};
use crate::id::DeviceId;
use crate::record::Record;

/// Default number of batteries a single device may hold at once.
pub const MAX_BATTERIES_PER_DEVICE: usize = 5;

/// A monitored device together with the batteries currently attached to it.
///
/// `batteries` is derived from the battery side of the association; it is
/// populated by repositories on read and never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub firmware_version: String,
    pub status: bool,
    pub batteries: Vec<Battery>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), DevmonError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

impl Record for Device {
    type Id = DeviceId;
    type Update = DeviceUpdate;

    const KIND: &'static str = "Device";

    fn id(&self) -> DeviceId {
        self.id
    }

    fn apply(&mut self, update: DeviceUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(firmware_version) = update.firmware_version {
            self.firmware_version = firmware_version;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Sparse update for a [`Device`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub firmware_version: Option<String>,
    pub status: Option<bool>,
}

impl DeviceUpdate {
    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] when a new `name` is empty.
    pub fn validate(&self) -> Result<(), DevmonError> {
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// A device's own columns, without its battery list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
    pub firmware_version: String,
    pub status: bool,
}

impl From<&Device> for DeviceSummary {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            firmware_version: device.firmware_version.clone(),
            status: device.status,
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    firmware_version: Option<String>,
    status: bool,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Consume the builder, validate, and return a [`Device`] with no batteries.
    ///
    /// A fresh [`DeviceId`] is generated unless one was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Device, DevmonError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            firmware_version: self.firmware_version.unwrap_or_default(),
            status: self.status,
            batteries: Vec::new(),
        };
        device.validate()?;
        Ok(device)
    }
}
