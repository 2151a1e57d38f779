//! Device service — use-cases for managing devices.

use devmon_domain::device::{Device, DeviceUpdate};
use devmon_domain::error::DevmonError;
use devmon_domain::id::DeviceId;

use crate::ports::DeviceRepository;
use crate::validators::{ensure_exists, ensure_name_unique};

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all devices, each with its attached batteries.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(&self) -> Result<Vec<Device>, DevmonError> {
        let devices = self.repo.get_all().await?;
        tracing::debug!(count = devices.len(), "devices listed");
        Ok(devices)
    }

    /// Create a new device after checking that its name is free.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] if invariants fail,
    /// [`DevmonError::Conflict`] if the name is taken, or a storage error.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id, device_name = %device.name))]
    pub async fn create_device(&self, device: Device) -> Result<Device, DevmonError> {
        device.validate()?;
        ensure_name_unique(&self.repo, &device.name).await?;
        let created = self.repo.create(device).await?;
        tracing::info!("device created");
        Ok(created)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DevmonError> {
        ensure_exists::<Device, _>(&self.repo, id).await
    }

    /// Apply a partial update to an existing device.
    ///
    /// A rename is checked for uniqueness only when the name actually changes.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] for an invalid payload,
    /// [`DevmonError::NotFound`] for an unknown id, [`DevmonError::Conflict`]
    /// if the new name is taken, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        update: DeviceUpdate,
    ) -> Result<Device, DevmonError> {
        update.validate()?;
        let existing = ensure_exists::<Device, _>(&self.repo, id).await?;
        if let Some(name) = update.name.as_deref().filter(|name| *name != existing.name) {
            ensure_name_unique(&self.repo, name).await?;
        }
        let updated = self.repo.update(existing, update).await?;
        tracing::info!("device updated");
        Ok(updated)
    }

    /// Delete a device, detaching (not deleting) its batteries.
    ///
    /// Returns the device as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_device(&self, id: DeviceId) -> Result<Device, DevmonError> {
        let existing = ensure_exists::<Device, _>(&self.repo, id).await?;
        let removed = self.repo.remove(existing).await?;
        tracing::info!(detached = removed.batteries.len(), "device removed");
        Ok(removed)
    }
}
