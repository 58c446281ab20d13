use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use fleetbill_directory::{ContactInfo, Customer, CustomerId};
use fleetbill_store::RecordStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/:id", get(get_customer))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let customer = Customer::new(CustomerId::new(), body.name).with_contact(ContactInfo {
        email: body.email,
        phone: body.phone,
        address: body.address,
    });
    match services.engine.customers.create(customer) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match common::parse_id(&id, "customer id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.customers.get(&id) {
        Some(customer) => Json(customer).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.customers.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
