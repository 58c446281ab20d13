use axum::Router;

pub mod billing;
pub mod common;
pub mod customers;
pub mod invoices;
pub mod projects;
pub mod purchases;
pub mod quotations;
pub mod receipts;
pub mod system;
pub mod vehicles;
pub mod vendors;

pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/vendors", vendors::router())
        .nest("/vehicles", vehicles::router())
        .nest("/quotations", quotations::router())
        .nest("/purchase-orders", purchases::router())
        .nest("/invoices", invoices::router())
        .nest("/receipts", receipts::router())
        .nest("/projects", projects::router())
        .nest("/billing", billing::router())
}
