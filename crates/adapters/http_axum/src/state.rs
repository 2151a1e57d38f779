//! Shared application state for axum handlers.

use std::sync::Arc;

use devmon_app::ports::{BatteryRepository, DeviceRepository};
use devmon_app::services::battery_service::BatteryService;
use devmon_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`. Only the `Arc` wrappers are cloned.
pub struct AppState<DR, BR> {
    /// Device CRUD service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Battery CRUD service; also reads devices to enforce capacity.
    pub battery_service: Arc<BatteryService<BR, DR>>,
}

impl<DR, BR> Clone for AppState<DR, BR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            battery_service: Arc::clone(&self.battery_service),
        }
    }
}

impl<DR, BR> AppState<DR, BR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(device_service: DeviceService<DR>, battery_service: BatteryService<BR, DR>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            battery_service: Arc::new(battery_service),
        }
    }
}
