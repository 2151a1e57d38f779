//! `HashMap`-backed repository used by the service and validator tests.
//!
//! One store implements both ports so device reads see battery writes, the
//! same way the `SQLite` adapter derives `Device::batteries`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use devmon_domain::battery::{Battery, BatteryUpdate};
use devmon_domain::device::{Device, DeviceUpdate};
use devmon_domain::error::DevmonError;
use devmon_domain::id::{BatteryId, DeviceId};
use devmon_domain::record::Record;

use crate::ports::{BatteryRepository, DeviceRepository, Repository};

#[derive(Default)]
struct Tables {
    devices: HashMap<DeviceId, Device>,
    batteries: HashMap<BatteryId, Battery>,
}

impl Tables {
    fn hydrate(&self, device: &Device) -> Device {
        let mut device = device.clone();
        device.batteries = self
            .batteries
            .values()
            .filter(|b| b.device_id == Some(device.id))
            .cloned()
            .collect();
        device
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub(crate) fn device_count(&self) -> usize {
        self.tables.lock().unwrap().devices.len()
    }

    pub(crate) fn battery_count(&self) -> usize {
        self.tables.lock().unwrap().batteries.len()
    }
}

impl Repository<Device> for InMemoryStore {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.devices.insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevmonError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Device> = tables.devices.values().map(|d| tables.hydrate(d)).collect();
        async { Ok(result) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevmonError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.devices.get(&id).map(|d| tables.hydrate(d));
        async { Ok(result) }
    }

    fn update(
        &self,
        mut existing: Device,
        update: DeviceUpdate,
    ) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        existing.apply(update);
        let mut tables = self.tables.lock().unwrap();
        tables.devices.insert(existing.id, existing.clone());
        async { Ok(existing) }
    }

    fn remove(&self, existing: Device) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        for battery in tables.batteries.values_mut() {
            if battery.device_id == Some(existing.id) {
                battery.device_id = None;
            }
        }
        tables.devices.remove(&existing.id);
        async { Ok(existing) }
    }
}

impl DeviceRepository for InMemoryStore {
    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevmonError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables
            .devices
            .values()
            .find(|d| d.name == name)
            .map(|d| tables.hydrate(d));
        async { Ok(result) }
    }
}

impl Repository<Battery> for InMemoryStore {
    fn create(&self, battery: Battery) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.batteries.insert(battery.id, battery.clone());
        async { Ok(battery) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Battery>, DevmonError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result: Vec<Battery> = tables.batteries.values().cloned().collect();
        async { Ok(result) }
    }

    fn get_by_id(
        &self,
        id: BatteryId,
    ) -> impl Future<Output = Result<Option<Battery>, DevmonError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.batteries.get(&id).cloned();
        async { Ok(result) }
    }

    fn update(
        &self,
        mut existing: Battery,
        update: BatteryUpdate,
    ) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        existing.apply(update);
        let mut tables = self.tables.lock().unwrap();
        tables.batteries.insert(existing.id, existing.clone());
        async { Ok(existing) }
    }

    fn remove(
        &self,
        existing: Battery,
    ) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.batteries.remove(&existing.id);
        async { Ok(existing) }
    }
}

impl BatteryRepository for InMemoryStore {}
