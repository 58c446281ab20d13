use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use fleetbill_directory::{ContactInfo, Vendor, VendorId};
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_vendor).get(list_vendors))
        .route("/:id", get(get_vendor))
}

pub async fn create_vendor(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateVendorRequest>,
) -> axum::response::Response {
    let vendor = Vendor::new(VendorId::new(), body.name).with_contact(ContactInfo {
        email: body.email,
        phone: body.phone,
        address: body.address,
    });
    match services.engine.vendors.create(vendor) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_vendor(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: VendorId = match common::parse_id(&id, "vendor id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.vendors.get(&id) {
        Some(vendor) => Json(vendor).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "vendor not found"),
    }
}

pub async fn list_vendors(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.vendors.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
