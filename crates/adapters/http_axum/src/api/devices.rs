//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use devmon_app::ports::{BatteryRepository, DeviceRepository};
use devmon_domain::device::{Device, DeviceUpdate};
use devmon_domain::id::DeviceId;

use super::parse_id;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub firmware_version: String,
    pub status: Option<bool>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update, and remove endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR, BR>(
    State(state): State<AppState<DR, BR>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/:id`
pub async fn get<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    ApiJson(req): ApiJson<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let mut builder = Device::builder()
        .name(req.name)
        .firmware_version(req.firmware_version);
    if let Some(status) = req.status {
        builder = builder.status(status);
    }

    let device = builder.build()?;
    let created = state.device_service.create_device(device).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/devices/:id`: only the fields present in the body change.
pub async fn update<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<DeviceUpdate>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.update_device(device_id, req).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/:id`: responds with the device as it was; its
/// batteries are detached, not deleted.
pub async fn remove<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.remove_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}
