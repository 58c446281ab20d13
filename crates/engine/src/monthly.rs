//! Monthly invoice generation from the usage ledger.
//!
//! Append-never-merge: each run bills exactly the unbilled usage that falls
//! in the requested month. A rerun with nothing new returns `None`; usage
//! recorded after a run produces a second, smaller invoice on the next call.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use fleetbill_billing::LineItem;
use fleetbill_billing::line_item::validate_pct;
use fleetbill_core::{DomainError, DomainResult};
use fleetbill_directory::VehicleDirectory;
use fleetbill_invoicing::{Invoice, InvoiceId};
use fleetbill_projects::{MonthlyInvoice, MonthlyInvoiceId, Project, ProjectId, UsageEntry, UsageEntryId};

use crate::SharedStore;
use crate::numbers::DocumentNumbers;

/// Default payment terms for generated invoices.
const NET_DAYS: i64 = 30;

/// Turns a project's unbilled usage for one month into an invoice plus its
/// [`MonthlyInvoice`] aggregate, retiring the consumed entries.
pub struct MonthlyBilling {
    projects: SharedStore<Project>,
    usage: SharedStore<UsageEntry>,
    invoices: SharedStore<Invoice>,
    monthly: SharedStore<MonthlyInvoice>,
    vehicles: Arc<dyn VehicleDirectory>,
    numbers: Arc<DocumentNumbers>,
}

impl MonthlyBilling {
    pub fn new(
        projects: SharedStore<Project>,
        usage: SharedStore<UsageEntry>,
        invoices: SharedStore<Invoice>,
        monthly: SharedStore<MonthlyInvoice>,
        vehicles: Arc<dyn VehicleDirectory>,
        numbers: Arc<DocumentNumbers>,
    ) -> Self {
        Self {
            projects,
            usage,
            invoices,
            monthly,
            vehicles,
            numbers,
        }
    }

    /// Generate the invoice for `(project_id, month, year)`.
    ///
    /// Returns `Ok(None)` when no unbilled usage falls in the month: that is
    /// "nothing to bill", not a failure. Entry claims and record creation are
    /// one unit: any failure releases every entry claimed by this run and
    /// removes any created records before the error propagates.
    pub fn generate(
        &self,
        project_id: &ProjectId,
        month: u32,
        year: i32,
        tax_rate: Decimal,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<MonthlyInvoice>> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "month must be 1-12, got {month}"
            )));
        }
        validate_pct("tax", tax_rate)?;

        let project = self.projects.get(project_id).ok_or(DomainError::NotFound)?;

        let mut entries: Vec<UsageEntry> = self
            .usage
            .all()
            .into_iter()
            .filter(|e| e.project_id == *project_id && !e.invoiced && e.falls_in(month, year))
            .collect();
        if entries.is_empty() {
            tracing::info!(project = %project.number, month, year, "no unbilled usage");
            return Ok(None);
        }
        entries.sort_by_key(|e| (e.date, *e.id.as_uuid()));

        for entry in &mut entries {
            entry.apply_project_rate(&project);
        }

        let total_hours: Decimal = entries.iter().filter_map(|e| e.hours).sum();
        let total_days: Decimal = entries.iter().filter_map(|e| e.days).sum();
        let items: Vec<LineItem> = entries
            .iter()
            .map(|e| self.line_for(e, &project))
            .collect();

        let invoice_id = InvoiceId::new();
        let mut invoice = Invoice::new(
            invoice_id,
            self.numbers.monthly_invoice(year, month, &project.number),
            project.customer_id,
            now,
            now + Duration::days(NET_DAYS),
            project.billing_type,
            tax_rate,
            items,
        )?;
        invoice.quotation_id = Some(project.quotation_id);

        let monthly = MonthlyInvoice {
            id: MonthlyInvoiceId::new(),
            invoice_id,
            invoice_number: invoice.number.clone(),
            project_id: *project_id,
            month,
            year,
            usage_entry_ids: entries.iter().map(|e| e.id).collect(),
            total_hours,
            total_days,
            subtotal: invoice.subtotal,
            tax_amount: invoice.tax_amount,
            total: invoice.total,
            status: invoice.status,
        };

        // Claim first, then persist the invoice records; compensate on any
        // failure so no entry stays claimed without an invoice and no
        // orphan invoice survives. A concurrent run claiming the same entry
        // surfaces as InconsistentState from the claim guard.
        let mut claimed: Vec<UsageEntryId> = Vec::new();
        for entry in &entries {
            let claim = self.usage.update(&entry.id, &|e| {
                e.apply_project_rate(&project);
                e.claim(invoice_id)
            });
            match claim {
                Ok(_) => claimed.push(entry.id),
                Err(e) => {
                    self.release(&claimed);
                    return Err(e);
                }
            }
        }

        if let Err(e) = self.invoices.create(invoice) {
            self.release(&claimed);
            return Err(e);
        }
        let monthly = match self.monthly.create(monthly) {
            Ok(m) => m,
            Err(e) => {
                self.invoices.delete(&invoice_id);
                self.release(&claimed);
                return Err(e);
            }
        };

        tracing::info!(
            invoice = %monthly.invoice_number,
            entries = monthly.usage_entry_ids.len(),
            total = %monthly.total,
            "monthly invoice generated"
        );
        Ok(Some(monthly))
    }

    /// Compensating action: unclaim everything this run claimed.
    fn release(&self, claimed: &[UsageEntryId]) {
        for id in claimed {
            let released = self.usage.update(id, &|e| {
                e.release();
                Ok(())
            });
            if let Err(err) = released {
                tracing::warn!(entry = %id, error = %err, "failed to release usage entry");
            }
        }
    }

    fn line_for(&self, entry: &UsageEntry, project: &Project) -> LineItem {
        let mut description = entry.description.clone();
        if let Some(vehicle) = entry.vehicle_id.and_then(|id| self.vehicles.get(&id)) {
            let _ = write!(description, ", {}", vehicle.label());
        }
        if let Some(location) = &entry.location {
            let _ = write!(description, ", {location}");
        }
        LineItem::new(
            description,
            project.billing_type,
            entry.metric(project.billing_type),
            entry.rate,
        )
    }
}
