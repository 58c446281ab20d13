use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use fleetbill_invoicing::ReceiptId;
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_receipts))
        .route("/:id", get(get_receipt).put(update_receipt).delete(delete_receipt))
        .route("/:id/cancel", post(cancel_receipt))
}

pub async fn update_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateReceiptRequest>,
) -> axum::response::Response {
    let id: ReceiptId = match common::parse_id(&id, "receipt id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services
        .engine
        .receipt_service
        .update_amount(&id, body.amount, Utc::now())
    {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn cancel_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReceiptId = match common::parse_id(&id, "receipt id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.receipt_service.cancel(&id, Utc::now()) {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReceiptId = match common::parse_id(&id, "receipt id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.receipt_service.delete(&id, Utc::now()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReceiptId = match common::parse_id(&id, "receipt id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.receipts.get(&id) {
        Some(receipt) => Json(receipt).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "receipt not found"),
    }
}

pub async fn list_receipts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.receipts.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
