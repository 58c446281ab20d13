use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;

use fleetbill_engine::NewQuotation;
use fleetbill_quotations::QuotationId;
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_quotation).get(list_quotations))
        .route("/:id", get(get_quotation))
        .route("/:id/items", put(replace_quotation_items))
        .route("/:id/send", post(send_quotation))
        .route("/:id/accept", post(accept_quotation))
        .route("/:id/reject", post(reject_quotation))
        .route("/:id/expire", post(expire_quotation))
}

pub async fn create_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateQuotationRequest>,
) -> axum::response::Response {
    let customer_id = match common::parse_id(&body.customer_id, "customer id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let valid_until = match &body.valid_until {
        Some(value) => match common::parse_rfc3339(value, "valid_until") {
            Ok(dt) => Some(dt),
            Err(resp) => return resp,
        },
        None => None,
    };

    let req = NewQuotation {
        customer_id,
        valid_until,
        billing_type: body.billing_type,
        tax_rate: body.tax_rate,
        items: dto::into_items(body.items),
    };
    match services.engine.documents.create_quotation(req, Utc::now()) {
        Ok(quotation) => (StatusCode::CREATED, Json(quotation)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn replace_quotation_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<Vec<dto::LineItemRequest>>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let items = dto::into_items(body);
    match services.engine.documents.replace_quotation_items(&id, items) {
        Ok(quotation) => Json(quotation).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn send_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.send_quotation(&id) {
        Ok(quotation) => Json(quotation).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn accept_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.accept_quotation(&id) {
        Ok(quotation) => Json(quotation).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn reject_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.reject_quotation(&id) {
        Ok(quotation) => Json(quotation).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn expire_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.expire_quotation(&id) {
        Ok(quotation) => Json(quotation).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: QuotationId = match common::parse_id(&id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.quotations.get(&id) {
        Some(quotation) => Json(quotation).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "quotation not found"),
    }
}

pub async fn list_quotations(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.quotations.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
