use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use fleetbill_engine::{NewProject, NewUsageEntry};
use fleetbill_projects::ProjectId;
use fleetbill_store::{RecordStore, SettingsStore};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_project).get(list_projects))
        .route("/:id", get(get_project))
        .route("/:id/po-received", post(mark_po_received))
        .route("/:id/activate", post(activate_project))
        .route("/:id/complete", post(complete_project))
        .route("/:id/vehicles", post(assign_vehicle))
        .route("/:id/usage", post(record_usage).get(list_usage))
        .route("/:id/invoices/monthly", post(generate_monthly_invoice))
}

pub async fn create_project(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProjectRequest>,
) -> axum::response::Response {
    let quotation_id = match common::parse_id(&body.quotation_id, "quotation id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let req = NewProject {
        quotation_id,
        hourly_rate: body.hourly_rate,
        daily_rate: body.daily_rate,
    };
    match services.engine.project_service.create_project(req, Utc::now()) {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn mark_po_received(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.project_service.mark_po_received(&id) {
        Ok(project) => Json(project).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn activate_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.project_service.activate(&id) {
        Ok(project) => Json(project).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn complete_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.project_service.complete(&id) {
        Ok(project) => Json(project).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn assign_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignVehicleRequest>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let vehicle_id = match common::parse_id(&body.vehicle_id, "vehicle id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.project_service.assign_vehicle(&id, vehicle_id) {
        Ok(project) => Json(project).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn record_usage(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::RecordUsageRequest>,
) -> axum::response::Response {
    let project_id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let vehicle_id = match &body.vehicle_id {
        Some(value) => match common::parse_id(value, "vehicle id") {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let date = match common::parse_date(&body.date, "date") {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let req = NewUsageEntry {
        project_id,
        vehicle_id,
        date,
        description: body.description,
        location: body.location,
        hours: body.hours,
        days: body.days,
        rate: body.rate,
    };
    match services.engine.project_service.record_usage(req) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_usage(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let items = services.engine.project_service.usage_for(&id);
    Json(serde_json::json!({ "items": items })).into_response()
}

/// Generate the monthly invoice for a project's unbilled usage. A period
/// with nothing to bill is an informational result, not an error.
pub async fn generate_monthly_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::GenerateMonthlyInvoiceRequest>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let tax_rate = body
        .tax_rate
        .unwrap_or_else(|| services.engine.settings.get().default_tax_rate);

    match services
        .engine
        .monthly_billing
        .generate(&id, body.month, body.year, tax_rate, Utc::now())
    {
        Ok(Some(monthly)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "generated": true, "monthly_invoice": monthly })),
        )
            .into_response(),
        Ok(None) => Json(serde_json::json!({
            "generated": false,
            "message": "no unbilled usage for the period",
        }))
        .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_project(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProjectId = match common::parse_id(&id, "project id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.engine.projects.get(&id) {
        Some(project) => Json(project).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "project not found"),
    }
}

pub async fn list_projects(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.engine.projects.all();
    Json(serde_json::json!({ "items": items })).into_response()
}
