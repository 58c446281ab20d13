//! `fleetbill-engine` — orchestration over the domain crates and stores.
//!
//! Services here own the side-effectful paths: numbered document creation and
//! chaining, the monthly usage-invoice generator, and receipt handling with
//! payment reconciliation. All of them depend only on the persistence ports
//! from `fleetbill-store`.

pub mod adapters;
pub mod documents;
pub mod monthly;
pub mod numbers;
pub mod projects;
pub mod receipts;
pub mod wiring;


use std::sync::Arc;

use fleetbill_store::RecordStore;

/// Shared handle to an entity store.
pub type SharedStore<T> = Arc<dyn RecordStore<T>>;

pub use documents::{DocumentService, NewInvoice, NewPurchaseOrder, NewQuotation};
pub use monthly::MonthlyBilling;
pub use numbers::DocumentNumbers;
pub use projects::{NewProject, NewUsageEntry, ProjectService};
pub use receipts::ReceiptService;
pub use wiring::Engine;
