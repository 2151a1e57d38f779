//! Storage port — repository traits for persistence.

use std::future::Future;

use devmon_domain::battery::Battery;
use devmon_domain::device::Device;
use devmon_domain::error::DevmonError;
use devmon_domain::record::Record;

/// Generic data access over a [`Record`] type.
///
/// Lookups report absence as `Ok(None)`; callers decide whether that is an
/// error. `update` and `remove` take the record the caller already fetched
/// and do not check existence again.
pub trait Repository<T: Record> {
    /// Insert a new record and return it as persisted.
    fn create(&self, record: T) -> impl Future<Output = Result<T, DevmonError>> + Send;

    /// Return every record, in no particular order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, DevmonError>> + Send;

    /// Point lookup by primary key.
    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, DevmonError>> + Send;

    /// Apply the fields present in `update` to `existing` and persist the result.
    fn update(
        &self,
        existing: T,
        update: T::Update,
    ) -> impl Future<Output = Result<T, DevmonError>> + Send;

    /// Delete `existing` and return it as it was before deletion.
    fn remove(&self, existing: T) -> impl Future<Output = Result<T, DevmonError>> + Send;
}

/// Repository for [`Device`]s.
///
/// Implementations populate [`Device::batteries`] on every read. `remove`
/// must clear the association of every attached battery before deleting the
/// device row, in the same storage transaction; batteries are never deleted
/// with their device.
pub trait DeviceRepository: Repository<Device> {
    /// Exact-match lookup by device name.
    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevmonError>> + Send;
}

/// Repository for [`Battery`] records.
pub trait BatteryRepository: Repository<Battery> {}
