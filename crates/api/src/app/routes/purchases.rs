use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use fleetbill_billing::BillingType;
use fleetbill_engine::NewPurchaseOrder;
use fleetbill_purchasing::PurchaseOrderId;
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_purchase_order).get(list_purchase_orders))
        .route("/:id", get(get_purchase_order))
        .route("/:id/submit", post(submit_purchase_order))
        .route("/:id/approve", post(approve_purchase_order))
        .route("/:id/receive", post(receive_purchase_order))
        .route("/:id/cancel", post(cancel_purchase_order))
}

pub async fn create_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePurchaseOrderRequest>,
) -> axum::response::Response {
    let quotation_id = match &body.quotation_id {
        Some(value) => match common::parse_id(value, "quotation id") {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let vendor_id = match &body.vendor_id {
        Some(value) => match common::parse_id(value, "vendor id") {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let customer_id = match &body.customer_id {
        Some(value) => match common::parse_id(value, "customer id") {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let billing_type = match (quotation_id, body.billing_type) {
        (None, None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "billing_type is required without a quotation",
            );
        }
        (_, billing_type) => billing_type.unwrap_or(BillingType::Quantity),
    };

    let req = NewPurchaseOrder {
        quotation_id,
        vendor_id,
        customer_id,
        billing_type,
        tax_rate: body.tax_rate,
        items: dto::into_items(body.items),
    };
    match services.engine.documents.create_purchase_order(req, Utc::now()) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn submit_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseOrderId = match common::parse_id(&id, "purchase order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.submit_purchase_order(&id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approve_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseOrderId = match common::parse_id(&id, "purchase order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.approve_purchase_order(&id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn receive_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseOrderId = match common::parse_id(&id, "purchase order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.receive_purchase_order(&id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn cancel_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseOrderId = match common::parse_id(&id, "purchase order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.cancel_purchase_order(&id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_purchase_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseOrderId = match common::parse_id(&id, "purchase order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.purchase_orders.get(&id) {
        Some(order) => Json(order).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "purchase order not found"),
    }
}

pub async fn list_purchase_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.purchase_orders.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
