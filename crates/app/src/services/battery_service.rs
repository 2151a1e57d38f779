//! Battery service — use-cases for managing batteries and their association
//! with devices.

use std::collections::HashMap;

use devmon_domain::battery::{Battery, BatteryUpdate, BatteryWithDevice};
use devmon_domain::device::{Device, DeviceSummary, MAX_BATTERIES_PER_DEVICE};
use devmon_domain::error::DevmonError;
use devmon_domain::id::{BatteryId, DeviceId};

use crate::ports::{BatteryRepository, DeviceRepository};
use crate::validators::{ensure_battery_capacity, ensure_exists};

/// Application service for battery CRUD operations.
///
/// Holds a device repository as well, to resolve and capacity-check the
/// device a battery is being attached to.
pub struct BatteryService<BR, DR> {
    batteries: BR,
    devices: DR,
    battery_limit: usize,
}

impl<BR, DR> BatteryService<BR, DR>
where
    BR: BatteryRepository,
    DR: DeviceRepository,
{
    /// Create a new service enforcing the default per-device battery limit.
    pub fn new(batteries: BR, devices: DR) -> Self {
        Self {
            batteries,
            devices,
            battery_limit: MAX_BATTERIES_PER_DEVICE,
        }
    }

    /// Override the maximum number of batteries a device may hold.
    #[must_use]
    pub fn with_battery_limit(mut self, limit: usize) -> Self {
        self.battery_limit = limit;
        self
    }

    /// List all batteries, each joined with its device (if attached).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_batteries(&self) -> Result<Vec<BatteryWithDevice>, DevmonError> {
        let batteries = self.batteries.get_all().await?;
        let devices: HashMap<DeviceId, DeviceSummary> = self
            .devices
            .get_all()
            .await?
            .iter()
            .map(|device| (device.id, DeviceSummary::from(device)))
            .collect();

        tracing::debug!(count = batteries.len(), "batteries listed");
        Ok(batteries
            .into_iter()
            .map(|battery| {
                let device = battery.device_id.and_then(|id| devices.get(&id).cloned());
                BatteryWithDevice { battery, device }
            })
            .collect())
    }

    /// Create a new battery, attached to `device_id` when one is given.
    ///
    /// Attaching requires the device to exist and to have room for one more
    /// battery; an unattached battery is inserted without either check.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] if invariants fail,
    /// [`DevmonError::NotFound`] for an unknown device,
    /// [`DevmonError::CapacityExceeded`] if the device is full, or a storage error.
    #[tracing::instrument(skip(self, battery), fields(battery_id = %battery.id, device_id = ?battery.device_id))]
    pub async fn create_battery(&self, battery: Battery) -> Result<Battery, DevmonError> {
        battery.validate()?;
        if let Some(device_id) = battery.device_id {
            self.ensure_room_on(device_id).await?;
        }
        let created = self.batteries.create(battery).await?;
        tracing::info!("battery created");
        Ok(created)
    }

    /// Look up a battery by id, joined with its device.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::NotFound`] when no battery with `id` exists,
    /// or a storage error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_battery(&self, id: BatteryId) -> Result<BatteryWithDevice, DevmonError> {
        let battery = ensure_exists::<Battery, _>(&self.batteries, id).await?;
        let device = match battery.device_id {
            Some(device_id) => self
                .devices
                .get_by_id(device_id)
                .await?
                .as_ref()
                .map(DeviceSummary::from),
            None => None,
        };
        Ok(BatteryWithDevice { battery, device })
    }

    /// Apply a partial update to an existing battery.
    ///
    /// Moving the battery onto a different device re-checks that device's
    /// existence and capacity. Detaching, or keeping the current device, does not.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] for an invalid payload,
    /// [`DevmonError::NotFound`] for an unknown battery or target device,
    /// [`DevmonError::CapacityExceeded`] if the target device is full, or a
    /// storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_battery(
        &self,
        id: BatteryId,
        update: BatteryUpdate,
    ) -> Result<Battery, DevmonError> {
        update.validate()?;
        let existing = ensure_exists::<Battery, _>(&self.batteries, id).await?;
        if let Some(target) = update
            .attaches_to()
            .filter(|target| existing.device_id != Some(*target))
        {
            self.ensure_room_on(target).await?;
        }
        let updated = self.batteries.update(existing, update).await?;
        tracing::info!(device_id = ?updated.device_id, "battery updated");
        Ok(updated)
    }

    /// Delete a battery, returning it as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_battery(&self, id: BatteryId) -> Result<Battery, DevmonError> {
        let existing = ensure_exists::<Battery, _>(&self.batteries, id).await?;
        let removed = self.batteries.remove(existing).await?;
        tracing::info!("battery removed");
        Ok(removed)
    }

    async fn ensure_room_on(&self, device_id: DeviceId) -> Result<(), DevmonError> {
        let device = ensure_exists::<Device, _>(&self.devices, device_id).await?;
        ensure_battery_capacity(&device, self.battery_limit)
    }
}
