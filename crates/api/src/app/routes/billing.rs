use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::post};

use fleetbill_billing::compute_document_totals;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/totals", post(totals))
}

/// Stateless preview of document totals under either tax policy; the same
/// arithmetic the documents use when they recompute themselves.
pub async fn totals(
    Extension(_services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TotalsRequest>,
) -> axum::response::Response {
    let items = dto::into_items(body.items);
    match compute_document_totals(&items, body.billing_type, &body.policy) {
        Ok(totals) => Json(totals).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
