//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod batteries;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use std::str::FromStr;

use axum::Router;
use axum::routing::get;

use devmon_app::ports::{BatteryRepository, DeviceRepository};
use devmon_domain::error::{DevmonError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, BR>() -> Router<AppState<DR, BR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, BR>).post(devices::create::<DR, BR>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, BR>)
                .patch(devices::update::<DR, BR>)
                .delete(devices::remove::<DR, BR>),
        )
        // Batteries
        .route(
            "/batteries",
            get(batteries::list::<DR, BR>).post(batteries::create::<DR, BR>),
        )
        .route(
            "/batteries/{id}",
            get(batteries::get::<DR, BR>)
                .patch(batteries::update::<DR, BR>)
                .delete(batteries::remove::<DR, BR>),
        )
}

/// Parse a path segment into a typed id, rejecting malformed input with 400.
fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    I::from_str(raw)
        .map_err(|_| ApiError::from(DevmonError::from(ValidationError::InvalidId(raw.to_string()))))
}
