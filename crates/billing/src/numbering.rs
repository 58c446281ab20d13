//! Human-readable document number formats.
//!
//! Formatting is a pure step; uniqueness comes from the injected
//! per-kind monotonic sequence (see `fleetbill-store::sequence`). The old
//! truncated-timestamp suffix could collide within a millisecond window and
//! was replaced by the counter while keeping the prefix/year/month layout.

use serde::{Deserialize, Serialize};

/// Numbered document kinds. Each kind has its own prefix and counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quotation,
    PurchaseOrder,
    Invoice,
    Receipt,
    Project,
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::PurchaseOrder => "purchase_order",
            DocumentKind::Invoice => "invoice",
            DocumentKind::Receipt => "receipt",
            DocumentKind::Project => "project",
        };
        f.write_str(s)
    }
}

/// `{prefix}-{year}-{month:02}-{sequence:06}`.
pub fn format_document_number(prefix: &str, year: i32, month: u32, sequence: u64) -> String {
    format!("{prefix}-{year}-{month:02}-{sequence:06}")
}

/// Monthly usage invoices carry the project number instead of a sequence:
/// `{prefix}-{year}-{month:02}-{project_number}`.
pub fn format_monthly_invoice_number(
    prefix: &str,
    year: i32,
    month: u32,
    project_number: &str,
) -> String {
    format!("{prefix}-{year}-{month:02}-{project_number}")
}
