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
use fleetbill_engine::NewInvoice;
use fleetbill_invoicing::InvoiceId;
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/send", post(send_invoice))
        .route("/:id/cancel", post(cancel_invoice))
        .route("/:id/reconcile", post(reconcile_invoice))
        .route("/:id/receipts", post(record_receipt).get(list_invoice_receipts))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateInvoiceRequest>,
) -> axum::response::Response {
    let quotation_id = match &body.quotation_id {
        Some(value) => match common::parse_id(value, "quotation id") {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let purchase_order_id = match &body.purchase_order_id {
        Some(value) => match common::parse_id(value, "purchase order id") {
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
    let due_date = match &body.due_date {
        Some(value) => match common::parse_rfc3339(value, "due_date") {
            Ok(dt) => Some(dt),
            Err(resp) => return resp,
        },
        None => None,
    };

    let req = NewInvoice {
        quotation_id,
        purchase_order_id,
        customer_id,
        due_date,
        billing_type: body.billing_type.unwrap_or(BillingType::Quantity),
        tax_rate: body.tax_rate,
        items: dto::into_items(body.items),
    };
    match services.engine.documents.create_invoice(req, Utc::now()) {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn send_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.send_invoice(&id) {
        Ok(invoice) => Json(invoice).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn cancel_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.documents.cancel_invoice(&id) {
        Ok(invoice) => Json(invoice).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Re-derive paid amount and status; also serves external overdue sweeps.
pub async fn reconcile_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.receipt_service.reconcile_invoice(&id, Utc::now()) {
        Ok(invoice) => Json(invoice).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn record_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::RecordReceiptRequest>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let payment_date = match common::parse_date(&body.payment_date, "payment_date") {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services
        .engine
        .receipt_service
        .record(&id, body.amount, payment_date, body.method, Utc::now())
    {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_invoice_receipts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let items: Vec<_> = services
        .engine
        .receipts
        .all()
        .into_iter()
        .filter(|r| r.invoice_id == id)
        .collect();
    Json(serde_json::json!({ "items": items })).into_response()
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match common::parse_id(&id, "invoice id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.invoices.get(&id) {
        Some(invoice) => Json(invoice).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.invoices.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
