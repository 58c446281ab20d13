//! Document number generation: configured prefixes + monotonic sequence.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use fleetbill_billing::{DocumentKind, format_document_number, format_monthly_invoice_number};
use fleetbill_store::{NumberSequence, SettingsStore};

/// Generates document numbers from the settings prefixes and the injected
/// per-kind sequence. Formatting and uniqueness stay separate concerns.
pub struct DocumentNumbers {
    settings: Arc<dyn SettingsStore>,
    sequence: Arc<dyn NumberSequence>,
}

impl DocumentNumbers {
    pub fn new(settings: Arc<dyn SettingsStore>, sequence: Arc<dyn NumberSequence>) -> Self {
        Self { settings, sequence }
    }

    /// `{prefix}-{year}-{month:02}-{seq:06}` for the given kind, stamped
    /// with `at`'s year/month.
    pub fn generate(&self, kind: DocumentKind, at: DateTime<Utc>) -> String {
        let settings = self.settings.get();
        let prefix = match kind {
            DocumentKind::Quotation => settings.quotation_prefix,
            DocumentKind::PurchaseOrder => settings.purchase_order_prefix,
            DocumentKind::Invoice => settings.invoice_prefix,
            DocumentKind::Receipt => settings.receipt_prefix,
            DocumentKind::Project => settings.project_prefix,
        };
        format_document_number(&prefix, at.year(), at.month(), self.sequence.next(kind))
    }

    /// Monthly usage invoices embed the project number instead of a
    /// sequence value.
    pub fn monthly_invoice(&self, year: i32, month: u32, project_number: &str) -> String {
        format_monthly_invoice_number(
            &self.settings.get().invoice_prefix,
            year,
            month,
            project_number,
        )
    }
}
