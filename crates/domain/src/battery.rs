//! Battery — a measured cell, optionally attached to one [`Device`](crate::device::Device).

use serde::{Deserialize, Deserializer, Serialize};

use crate::device::DeviceSummary;
use crate::error::{DevmonError, ValidationError};
use crate::id::{BatteryId, DeviceId};
use crate::record::Record;

/// A battery and its latest measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: BatteryId,
    pub name: String,
    /// Nominal voltage, in volts.
    pub voltage: f64,
    /// Residual capacity, in amp-hours.
    pub residual_capacity: f64,
    /// Expected lifespan, in hours.
    pub lifespan: f64,
    pub device_id: Option<DeviceId>,
}

impl Battery {
    /// Create a builder for constructing a [`Battery`].
    #[must_use]
    pub fn builder() -> BatteryBuilder {
        BatteryBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] when `name` is empty or any
    /// measurement is negative or NaN.
    pub fn validate(&self) -> Result<(), DevmonError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        non_negative("voltage", self.voltage)?;
        non_negative("residual_capacity", self.residual_capacity)?;
        non_negative("lifespan", self.lifespan)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

impl Record for Battery {
    type Id = BatteryId;
    type Update = BatteryUpdate;

    const KIND: &'static str = "Battery";

    fn id(&self) -> BatteryId {
        self.id
    }

    fn apply(&mut self, update: BatteryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(voltage) = update.voltage {
            self.voltage = voltage;
        }
        if let Some(residual_capacity) = update.residual_capacity {
            self.residual_capacity = residual_capacity;
        }
        if let Some(lifespan) = update.lifespan {
            self.lifespan = lifespan;
        }
        if let Some(device_id) = update.device_id {
            self.device_id = device_id;
        }
    }
}

/// Sparse update for a [`Battery`]; absent fields are left untouched.
///
/// `device_id` distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`, which detaches the battery).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatteryUpdate {
    pub name: Option<String>,
    pub voltage: Option<f64>,
    pub residual_capacity: Option<f64>,
    pub lifespan: Option<f64>,
    #[serde(deserialize_with = "present")]
    pub device_id: Option<Option<DeviceId>>,
}

impl BatteryUpdate {
    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] when a new `name` is empty or a new
    /// measurement is negative or NaN.
    pub fn validate(&self) -> Result<(), DevmonError> {
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyName.into());
        }
        for (field, value) in [
            ("voltage", self.voltage),
            ("residual_capacity", self.residual_capacity),
            ("lifespan", self.lifespan),
        ] {
            if let Some(value) = value {
                non_negative(field, value)?;
            }
        }
        Ok(())
    }

    /// The device this update attaches the battery to, if any.
    #[must_use]
    pub fn attaches_to(&self) -> Option<DeviceId> {
        self.device_id.flatten()
    }
}

/// Called only when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A battery joined with the device it is attached to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryWithDevice {
    #[serde(flatten)]
    pub battery: Battery,
    pub device: Option<DeviceSummary>,
}

/// Step-by-step builder for [`Battery`].
#[derive(Debug, Default)]
pub struct BatteryBuilder {
    id: Option<BatteryId>,
    name: Option<String>,
    voltage: f64,
    residual_capacity: f64,
    lifespan: f64,
    device_id: Option<DeviceId>,
}

impl BatteryBuilder {
    #[must_use]
    pub fn id(mut self, id: BatteryId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn voltage(mut self, voltage: f64) -> Self {
        self.voltage = voltage;
        self
    }

    #[must_use]
    pub fn residual_capacity(mut self, residual_capacity: f64) -> Self {
        self.residual_capacity = residual_capacity;
        self
    }

    #[must_use]
    pub fn lifespan(mut self, lifespan: f64) -> Self {
        self.lifespan = lifespan;
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Consume the builder, validate, and return a [`Battery`].
    ///
    /// # Errors
    ///
    /// Returns [`DevmonError::Validation`] if `name` is missing or empty, or
    /// a measurement is negative.
    pub fn build(self) -> Result<Battery, DevmonError> {
        let battery = Battery {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            voltage: self.voltage,
            residual_capacity: self.residual_capacity,
            lifespan: self.lifespan,
            device_id: self.device_id,
        };
        battery.validate()?;
        Ok(battery)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn cell() -> Battery {
        Battery::builder()
            .name("cell-a")
            .voltage(3.7)
            .residual_capacity(2.1)
            .lifespan(500.0)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_unattached_battery_by_default() {
        let battery = cell();
        assert_eq!(battery.voltage, 3.7);
        assert!(battery.device_id.is_none());
    }

    #[test]
    fn should_accept_zero_measurements() {
        let battery = Battery::builder().name("spent").build().unwrap();
        assert_eq!(battery.residual_capacity, 0.0);
    }

    #[test]
    fn should_reject_negative_voltage() {
        let result = Battery::builder().name("cell").voltage(-0.1).build();
        assert!(matches!(
            result,
            Err(DevmonError::Validation(ValidationError::Negative {
                field: "voltage",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_nan_lifespan() {
        let result = Battery::builder().name("cell").lifespan(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_update_with_negative_capacity() {
        let update = BatteryUpdate {
            residual_capacity: Some(-2.0),
            ..BatteryUpdate::default()
        };
        assert!(matches!(
            update.validate(),
            Err(DevmonError::Validation(ValidationError::Negative {
                field: "residual_capacity",
                ..
            }))
        ));
    }

    #[test]
    fn should_change_only_supplied_fields_when_applying_update() {
        let mut battery = cell();
        let before = battery.clone();

        battery.apply(BatteryUpdate {
            voltage: Some(0.0),
            ..BatteryUpdate::default()
        });

        assert_eq!(battery.voltage, 0.0);
        assert_eq!(battery.name, before.name);
        assert_eq!(battery.residual_capacity, before.residual_capacity);
        assert_eq!(battery.lifespan, before.lifespan);
        assert_eq!(battery.device_id, before.device_id);
    }

    #[test]
    fn should_distinguish_absent_device_id_from_null() {
        let absent: BatteryUpdate = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.device_id, None);

        let null: BatteryUpdate = serde_json::from_str(r#"{"device_id":null}"#).unwrap();
        assert_eq!(null.device_id, Some(None));
    }

    #[test]
    fn should_detach_when_update_sets_null_device() {
        let device_id = DeviceId::new();
        let mut battery = Battery::builder()
            .name("cell")
            .device_id(device_id)
            .build()
            .unwrap();

        battery.apply(BatteryUpdate {
            device_id: Some(None),
            ..BatteryUpdate::default()
        });

        assert!(battery.device_id.is_none());
    }

    #[test]
    fn should_parse_device_id_in_update_body() {
        let device_id = DeviceId::new();
        let body = format!(r#"{{"device_id":"{device_id}"}}"#);
        let update: BatteryUpdate = serde_json::from_str(&body).unwrap();
        assert_eq!(update.attaches_to(), Some(device_id));
    }

    #[test]
    fn should_flatten_battery_fields_next_to_device() {
        let view = BatteryWithDevice {
            battery: cell(),
            device: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "cell-a");
        assert!(json["device"].is_null());
    }
}
