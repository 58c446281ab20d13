use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_core::{Entity, define_id};
use fleetbill_invoicing::{InvoiceId, InvoiceStatus};

use crate::project::ProjectId;
use crate::usage::UsageEntryId;

define_id!(
    /// Monthly invoice identifier.
    MonthlyInvoiceId
);

/// Aggregate correlating one generated invoice with the usage entries it
/// consumed for a project/month. The money fields mirror the invoice at
/// generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyInvoice {
    pub id: MonthlyInvoiceId,
    pub invoice_id: InvoiceId,
    pub invoice_number: String,
    pub project_id: ProjectId,
    pub month: u32,
    pub year: i32,
    pub usage_entry_ids: Vec<UsageEntryId>,
    pub total_hours: Decimal,
    pub total_days: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    /// Status of the generated invoice when this aggregate was written.
    pub status: InvoiceStatus,
}

impl Entity for MonthlyInvoice {
    type Id = MonthlyInvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
