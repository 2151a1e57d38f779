//! `SQLite` implementation of [`BatteryRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devmon_app::ports::{BatteryRepository, Repository};
use devmon_domain::battery::{Battery, BatteryUpdate};
use devmon_domain::error::DevmonError;
use devmon_domain::id::{BatteryId, DeviceId};
use devmon_domain::record::Record;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Battery`].
///
/// Shared with the device repository, which loads each device's batteries.
pub(crate) struct Wrapper(pub(crate) Battery);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Battery> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let voltage: f64 = row.try_get("voltage")?;
        let residual_capacity: f64 = row.try_get("residual_capacity")?;
        let lifespan: f64 = row.try_get("lifespan")?;
        let device_id: Option<String> = row.try_get("device_id")?;

        let id = BatteryId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let device_id = device_id
            .map(|s| DeviceId::from_str(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Battery {
            id,
            name,
            voltage,
            residual_capacity,
            lifespan,
            device_id,
        }))
    }
}

const INSERT: &str = "INSERT INTO batteries (id, name, voltage, residual_capacity, lifespan, device_id) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM batteries WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM batteries ORDER BY rowid";
const UPDATE: &str = "UPDATE batteries SET name = ?, voltage = ?, residual_capacity = ?, lifespan = ?, device_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM batteries WHERE id = ?";

/// `SQLite`-backed battery repository.
#[derive(Clone)]
pub struct SqliteBatteryRepository {
    pool: SqlitePool,
}

impl SqliteBatteryRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Battery> for SqliteBatteryRepository {
    fn create(&self, battery: Battery) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(battery.id.to_string())
                .bind(&battery.name)
                .bind(battery.voltage)
                .bind(battery.residual_capacity)
                .bind(battery.lifespan)
                .bind(battery.device_id.map(|id| id.to_string()))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(battery)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Battery>, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_by_id(
        &self,
        id: BatteryId,
    ) -> impl Future<Output = Result<Option<Battery>, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(
        &self,
        mut existing: Battery,
        update: BatteryUpdate,
    ) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        let pool = self.pool.clone();
        existing.apply(update);
        async move {
            sqlx::query(UPDATE)
                .bind(&existing.name)
                .bind(existing.voltage)
                .bind(existing.residual_capacity)
                .bind(existing.lifespan)
                .bind(existing.device_id.map(|id| id.to_string()))
                .bind(existing.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(existing)
        }
    }

    fn remove(&self, existing: Battery) -> impl Future<Output = Result<Battery, DevmonError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(existing.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(existing)
        }
    }
}

impl BatteryRepository for SqliteBatteryRepository {}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::device_repo::SqliteDeviceRepository;
    use crate::pool::Config;
    use devmon_domain::device::Device;

    async fn setup() -> (SqliteBatteryRepository, SqliteDeviceRepository) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        (
            SqliteBatteryRepository::new(db.pool().clone()),
            SqliteDeviceRepository::new(db.pool().clone()),
        )
    }

    fn test_battery() -> Battery {
        Battery::builder()
            .name("cell-a")
            .voltage(3.7)
            .residual_capacity(2.1)
            .lifespan(500.0)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_battery_without_rounding() {
        let (repo, _) = setup().await;
        let battery = Battery::builder()
            .name("precise")
            .voltage(3.700_000_000_000_1)
            .residual_capacity(0.1 + 0.2)
            .lifespan(1e12)
            .build()
            .unwrap();
        let id = battery.id;

        repo.create(battery.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, battery);
    }

    #[tokio::test]
    async fn should_return_none_when_battery_not_found() {
        let (repo, _) = setup().await;
        let result = repo.get_by_id(BatteryId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_batteries_in_insertion_order() {
        let (repo, _) = setup().await;
        let first = repo.create(test_battery()).await.unwrap();
        let second = repo.create(test_battery()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<BatteryId> = all.iter().map(|b| b.id).collect();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[tokio::test]
    async fn should_persist_only_supplied_fields_on_update() {
        let (repo, _) = setup().await;
        let created = repo.create(test_battery()).await.unwrap();

        repo.update(
            created.clone(),
            BatteryUpdate {
                lifespan: Some(420.0),
                ..BatteryUpdate::default()
            },
        )
        .await
        .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.lifespan, 420.0);
        assert_eq!(fetched.voltage, created.voltage);
        assert_eq!(fetched.name, created.name);
    }

    #[tokio::test]
    async fn should_attach_and_detach_through_update() {
        let (repo, devices) = setup().await;
        let device = devices
            .create(
                Device::builder()
                    .name("sensor-1")
                    .firmware_version("1.0")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        let battery = repo.create(test_battery()).await.unwrap();

        let attached = repo
            .update(
                battery,
                BatteryUpdate {
                    device_id: Some(Some(device.id)),
                    ..BatteryUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            repo.get_by_id(attached.id).await.unwrap().unwrap().device_id,
            Some(device.id)
        );

        repo.update(
            attached.clone(),
            BatteryUpdate {
                device_id: Some(None),
                ..BatteryUpdate::default()
            },
        )
        .await
        .unwrap();
        assert!(
            repo.get_by_id(attached.id)
                .await
                .unwrap()
                .unwrap()
                .device_id
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_return_battery_as_it_was_when_removed() {
        let (repo, _) = setup().await;
        let created = repo.create(test_battery()).await.unwrap();

        let removed = repo.remove(created.clone()).await.unwrap();
        assert_eq!(removed, created);
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_surface_storage_error_for_unknown_device_reference() {
        let (repo, _) = setup().await;
        let orphan = Battery::builder()
            .name("orphan")
            .device_id(DeviceId::new())
            .build()
            .unwrap();

        let result = repo.create(orphan).await;
        assert!(matches!(result, Err(DevmonError::Storage(_))));
    }
}
