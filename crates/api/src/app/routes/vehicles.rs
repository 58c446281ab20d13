use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use fleetbill_directory::{Vehicle, VehicleId};
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route("/:id", get(get_vehicle))
}

pub async fn create_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateVehicleRequest>,
) -> axum::response::Response {
    let mut vehicle = Vehicle::new(VehicleId::new(), body.name);
    if let Some(plate) = body.plate_number {
        vehicle = vehicle.with_plate(plate);
    }
    match services.engine.vehicles.create(vehicle) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: VehicleId = match common::parse_id(&id, "vehicle id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.vehicles.get(&id) {
        Some(vehicle) => Json(vehicle).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "vehicle not found"),
    }
}

pub async fn list_vehicles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.vehicles.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
