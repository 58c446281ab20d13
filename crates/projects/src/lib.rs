//! `fleetbill-projects` — projects, the usage ledger, and monthly-invoice
//! aggregates.

pub mod monthly;
pub mod project;
pub mod usage;

pub use monthly::{MonthlyInvoice, MonthlyInvoiceId};
pub use project::{Project, ProjectId, ProjectStatus};
pub use usage::{UsageEntry, UsageEntryId};
