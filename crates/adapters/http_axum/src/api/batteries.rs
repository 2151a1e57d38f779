//! JSON REST handlers for batteries.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use devmon_app::ports::{BatteryRepository, DeviceRepository};
use devmon_domain::battery::{Battery, BatteryUpdate, BatteryWithDevice};
use devmon_domain::id::{BatteryId, DeviceId};

use super::parse_id;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Request body for creating a battery.
#[derive(Deserialize)]
pub struct CreateBatteryRequest {
    pub name: String,
    pub voltage: f64,
    pub residual_capacity: f64,
    pub lifespan: f64,
    pub device_id: Option<DeviceId>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<BatteryWithDevice>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<BatteryWithDevice>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update and remove endpoints.
pub enum MutateResponse {
    Ok(Json<Battery>),
}

impl IntoResponse for MutateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Battery>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/batteries`
pub async fn list<DR, BR>(
    State(state): State<AppState<DR, BR>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let batteries = state.battery_service.list_batteries().await?;
    Ok(ListResponse::Ok(Json(batteries)))
}

/// `GET /api/batteries/:id`
pub async fn get<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let battery_id: BatteryId = parse_id(&id)?;
    let battery = state.battery_service.get_battery(battery_id).await?;
    Ok(GetResponse::Ok(Json(battery)))
}

/// `POST /api/batteries`
pub async fn create<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    ApiJson(req): ApiJson<CreateBatteryRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let mut builder = Battery::builder()
        .name(req.name)
        .voltage(req.voltage)
        .residual_capacity(req.residual_capacity)
        .lifespan(req.lifespan);
    if let Some(device_id) = req.device_id {
        builder = builder.device_id(device_id);
    }

    let battery = builder.build()?;
    let created = state.battery_service.create_battery(battery).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/batteries/:id`: only the fields present in the body change;
/// `"device_id": null` detaches the battery.
pub async fn update<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<BatteryUpdate>,
) -> Result<MutateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let battery_id: BatteryId = parse_id(&id)?;
    let battery = state.battery_service.update_battery(battery_id, req).await?;
    Ok(MutateResponse::Ok(Json(battery)))
}

/// `DELETE /api/batteries/:id`: responds with the battery as it was.
pub async fn remove<DR, BR>(
    State(state): State<AppState<DR, BR>>,
    Path(id): Path<String>,
) -> Result<MutateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    BR: BatteryRepository + Send + Sync + 'static,
{
    let battery_id: BatteryId = parse_id(&id)?;
    let battery = state.battery_service.remove_battery(battery_id).await?;
    Ok(MutateResponse::Ok(Json(battery)))
}
