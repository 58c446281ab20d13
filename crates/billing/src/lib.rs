//! `fleetbill-billing` — pure billing arithmetic and document numbering.
//!
//! Everything here is deterministic and side-effect free: line amounts,
//! document totals under the two tax-attribution policies, and the
//! human-readable document number formats.

pub mod calculator;
pub mod line_item;
pub mod numbering;
pub mod totals;

pub use calculator::{LineAmounts, line_amounts};
pub use line_item::{BillingType, LineItem};
pub use numbering::{DocumentKind, format_document_number, format_monthly_invoice_number};
pub use totals::{DocumentTotals, TaxPolicy, compute_document_totals, price_items};
