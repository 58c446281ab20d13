//! `fleetbill-invoicing` — invoices, receipts, and payment reconciliation.

pub mod invoice;
pub mod receipt;
pub mod reconcile;

pub use invoice::{Invoice, InvoiceId, InvoiceStatus};
pub use receipt::{PaymentMethod, Receipt, ReceiptId, ReceiptStatus};
pub use reconcile::{reconcile, total_paid};
