//! Pre-mutation checks.
//!
//! Each validator either returns the verified value or fails with the
//! matching [`DevmonError`] variant. They only read; services run them to
//! completion before issuing any mutating repository call.

use devmon_domain::device::Device;
use devmon_domain::error::{CapacityExceededError, ConflictError, DevmonError, NotFoundError};
use devmon_domain::record::Record;

use crate::ports::{DeviceRepository, Repository};

/// Fetch the record with `id`, failing with [`DevmonError::NotFound`] if absent.
///
/// # Errors
///
/// Returns [`DevmonError::NotFound`] when no record matches, or a storage
/// error from the repository.
pub async fn ensure_exists<T, R>(repo: &R, id: T::Id) -> Result<T, DevmonError>
where
    T: Record,
    R: Repository<T> + ?Sized,
{
    match repo.get_by_id(id).await? {
        Some(record) => Ok(record),
        None => {
            tracing::debug!(entity = T::KIND, %id, "record not found");
            Err(NotFoundError {
                entity: T::KIND,
                id: id.to_string(),
            }
            .into())
        }
    }
}

/// Fail with [`DevmonError::Conflict`] if a device named `name` already exists.
///
/// # Errors
///
/// Returns [`DevmonError::Conflict`] on a name clash, or a storage error from
/// the repository.
pub async fn ensure_name_unique<R>(repo: &R, name: &str) -> Result<(), DevmonError>
where
    R: DeviceRepository + ?Sized,
{
    if repo.get_by_name(name).await?.is_some() {
        tracing::debug!(name, "device name already taken");
        return Err(ConflictError {
            entity: Device::KIND,
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Fail with [`DevmonError::CapacityExceeded`] if `device` already holds
/// `limit` or more batteries.
///
/// # Errors
///
/// Returns [`DevmonError::CapacityExceeded`] carrying `limit`.
pub fn ensure_battery_capacity(device: &Device, limit: usize) -> Result<(), DevmonError> {
    if device.batteries.len() >= limit {
        tracing::debug!(device_id = %device.id, limit, "device battery capacity reached");
        return Err(CapacityExceededError {
            device_id: device.id.to_string(),
            limit,
        }
        .into());
    }
    Ok(())
}
