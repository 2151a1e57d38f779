//! `SQLite` implementation of [`DeviceRepository`].

use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};

use devmon_app::ports::{DeviceRepository, Repository};
use devmon_domain::battery::Battery;
use devmon_domain::device::{Device, DeviceUpdate};
use devmon_domain::error::DevmonError;
use devmon_domain::id::DeviceId;
use devmon_domain::record::Record;

use crate::battery_repo;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
///
/// Rows carry no batteries; those are attached by [`attach_batteries`].
struct Wrapper(Device);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let firmware_version: String = row.try_get("firmware_version")?;
        let status: bool = row.try_get("status")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id,
            name,
            firmware_version,
            status,
            batteries: Vec::new(),
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, firmware_version, status) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_BY_NAME: &str = "SELECT * FROM devices WHERE name = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY rowid";
const UPDATE: &str = "UPDATE devices SET name = ?, firmware_version = ?, status = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

const SELECT_BATTERIES_BY_DEVICE: &str =
    "SELECT * FROM batteries WHERE device_id = ? ORDER BY rowid";
const SELECT_ATTACHED_BATTERIES: &str =
    "SELECT * FROM batteries WHERE device_id IS NOT NULL ORDER BY rowid";
const DETACH_BATTERIES: &str = "UPDATE batteries SET device_id = NULL WHERE device_id = ?";

/// Load the batteries attached to `device` on the same connection that read it.
async fn attach_batteries(
    conn: &mut SqliteConnection,
    mut device: Device,
) -> Result<Device, StorageError> {
    let rows: Vec<battery_repo::Wrapper> = sqlx::query_as(SELECT_BATTERIES_BY_DEVICE)
        .bind(device.id.to_string())
        .fetch_all(&mut *conn)
        .await?;
    device.batteries = rows.into_iter().map(|w| w.0).collect();
    Ok(device)
}

/// `SQLite`-backed device repository.
///
/// Every read derives [`Device::batteries`] from the `batteries` table, inside
/// one transaction with the device query so both see the same snapshot.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Device> for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(&device.firmware_version)
                .bind(device.status)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let attached: Vec<battery_repo::Wrapper> = sqlx::query_as(SELECT_ATTACHED_BATTERIES)
                .fetch_all(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            tx.commit().await.map_err(StorageError::from)?;

            let mut by_device: HashMap<DeviceId, Vec<Battery>> = HashMap::new();
            for battery in attached.into_iter().map(|w| w.0) {
                if let Some(device_id) = battery.device_id {
                    by_device.entry(device_id).or_default().push(battery);
                }
            }

            Ok(rows
                .into_iter()
                .map(|w| {
                    let mut device = w.0;
                    device.batteries = by_device.remove(&device.id).unwrap_or_default();
                    device
                })
                .collect())
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let device = match row {
                Some(w) => Some(attach_batteries(&mut tx, w.0).await?),
                None => None,
            };
            tx.commit().await.map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn update(
        &self,
        mut existing: Device,
        update: DeviceUpdate,
    ) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        let pool = self.pool.clone();
        existing.apply(update);
        async move {
            sqlx::query(UPDATE)
                .bind(&existing.name)
                .bind(&existing.firmware_version)
                .bind(existing.status)
                .bind(existing.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(existing)
        }
    }

    /// Detach every battery of `existing`, then delete it, in one transaction.
    fn remove(&self, existing: Device) -> impl Future<Output = Result<Device, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = existing.id.to_string();
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(DETACH_BATTERIES)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            sqlx::query(DELETE_BY_ID)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(existing)
        }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevmonError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
                .bind(name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let device = match row {
                Some(w) => Some(attach_batteries(&mut tx, w.0).await?),
                None => None,
            };
            tx.commit().await.map_err(StorageError::from)?;

            Ok(device)
        }
    }
}
