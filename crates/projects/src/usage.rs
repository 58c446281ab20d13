use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_billing::BillingType;
use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::VehicleId;
use fleetbill_invoicing::InvoiceId;

use crate::project::{Project, ProjectId};

define_id!(
    /// Usage entry identifier.
    UsageEntryId
);

/// One dated, billable occurrence of project/vehicle usage.
///
/// Ledger semantics: `invoiced` flips `false → true` exactly once, atomically
/// with the invoice that consumes the entry. An invoiced entry is immutable
/// except for corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub id: UsageEntryId,
    pub project_id: ProjectId,
    pub vehicle_id: Option<VehicleId>,
    pub date: NaiveDate,
    pub description: String,
    pub location: Option<String>,
    pub hours: Option<Decimal>,
    pub days: Option<Decimal>,
    pub rate: Decimal,
    pub total: Decimal,
    pub invoiced: bool,
    pub invoice_id: Option<InvoiceId>,
}

impl UsageEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UsageEntryId,
        project_id: ProjectId,
        vehicle_id: Option<VehicleId>,
        date: NaiveDate,
        description: impl Into<String>,
        hours: Option<Decimal>,
        days: Option<Decimal>,
        rate: Decimal,
    ) -> DomainResult<Self> {
        if hours.is_none() && days.is_none() {
            return Err(DomainError::validation(
                "usage entry needs hours or days",
            ));
        }
        for (name, metric) in [("hours", hours), ("days", days)] {
            if let Some(metric) = metric
                && metric < Decimal::ZERO
            {
                return Err(DomainError::validation(format!(
                    "{name} must not be negative"
                )));
            }
        }
        if rate < Decimal::ZERO {
            return Err(DomainError::validation("rate must not be negative"));
        }
        let mut entry = Self {
            id,
            project_id,
            vehicle_id,
            date,
            description: description.into(),
            location: None,
            hours,
            days,
            rate,
            total: Decimal::ZERO,
            invoiced: false,
            invoice_id: None,
        };
        entry.total = entry.metric_for_rate() * entry.rate;
        Ok(entry)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The metric this entry's own `total` is based on: hours if recorded,
    /// else days.
    fn metric_for_rate(&self) -> Decimal {
        self.hours.or(self.days).unwrap_or(Decimal::ZERO)
    }

    /// Billed metric under the project's billing type. Quantity-billed
    /// projects bill one unit per usage occurrence.
    pub fn metric(&self, billing_type: BillingType) -> Decimal {
        match billing_type {
            BillingType::Hours => self.hours.unwrap_or(Decimal::ZERO),
            BillingType::Days => self.days.unwrap_or(Decimal::ZERO),
            BillingType::Quantity => Decimal::ONE,
        }
    }

    /// Rate used at invoicing time: the project rate matching the billing
    /// type when the entry recorded that metric, otherwise the entry's own
    /// stored rate.
    pub fn effective_rate(&self, project: &Project) -> Decimal {
        match project.billing_type {
            BillingType::Hours if self.hours.is_some() => {
                project.hourly_rate.unwrap_or(self.rate)
            }
            BillingType::Days if self.days.is_some() => project.daily_rate.unwrap_or(self.rate),
            _ => self.rate,
        }
    }

    /// Re-derive rate and total against the project, if not already
    /// consistent.
    pub fn apply_project_rate(&mut self, project: &Project) {
        let rate = self.effective_rate(project);
        let total = self.metric(project.billing_type) * rate;
        if self.rate != rate || self.total != total {
            self.rate = rate;
            self.total = total;
        }
    }

    pub fn falls_in(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }

    /// One-way `unbilled → invoiced` transition.
    pub fn claim(&mut self, invoice_id: InvoiceId) -> DomainResult<()> {
        if self.invoiced {
            return Err(DomainError::inconsistent(format!(
                "usage entry {} is already on invoice {:?}",
                self.id, self.invoice_id
            )));
        }
        self.invoiced = true;
        self.invoice_id = Some(invoice_id);
        Ok(())
    }

    /// Compensating action for a failed generation run.
    pub fn release(&mut self) {
        self.invoiced = false;
        self.invoice_id = None;
    }
}

impl Entity for UsageEntry {
    type Id = UsageEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetbill_directory::CustomerId;
    use fleetbill_quotations::QuotationId;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn hourly_project(rate: Option<Decimal>) -> Project {
        Project::new(
            ProjectId::new(),
            "PRJ-2024-01-000001",
            QuotationId::new(),
            CustomerId::new(),
            BillingType::Hours,
            rate,
            None,
        )
        .unwrap()
    }

    fn entry(hours: Decimal, rate: Decimal) -> UsageEntry {
        UsageEntry::new(
            UsageEntryId::new(),
            ProjectId::new(),
            None,
            day(10),
            "site haulage",
            Some(hours),
            None,
            rate,
        )
        .unwrap()
    }

    #[test]
    fn total_is_metric_times_rate() {
        let e = entry(dec!(8), dec!(50));
        assert_eq!(e.total, dec!(400));
    }

    #[test]
    fn needs_some_metric() {
        let err = UsageEntry::new(
            UsageEntryId::new(),
            ProjectId::new(),
            None,
            day(1),
            "empty",
            None,
            None,
            dec!(10),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn project_rate_overrides_entry_rate() {
        let project = hourly_project(Some(dec!(60)));
        let mut e = entry(dec!(10), dec!(50));
        e.apply_project_rate(&project);
        assert_eq!(e.rate, dec!(60));
        assert_eq!(e.total, dec!(600));
    }

    #[test]
    fn entry_rate_is_the_fallback() {
        let project = hourly_project(None);
        let mut e = entry(dec!(10), dec!(50));
        e.apply_project_rate(&project);
        assert_eq!(e.rate, dec!(50));
        assert_eq!(e.total, dec!(500));
    }

    #[test]
    fn claim_is_one_way() {
        let mut e = entry(dec!(8), dec!(50));
        let invoice_id = InvoiceId::new();
        e.claim(invoice_id).unwrap();
        assert!(e.invoiced);
        assert_eq!(e.invoice_id, Some(invoice_id));

        let err = e.claim(InvoiceId::new()).unwrap_err();
        assert!(matches!(err, DomainError::InconsistentState(_)));
        // The original claim is untouched.
        assert_eq!(e.invoice_id, Some(invoice_id));
    }

    #[test]
    fn release_undoes_a_claim() {
        let mut e = entry(dec!(8), dec!(50));
        e.claim(InvoiceId::new()).unwrap();
        e.release();
        assert!(!e.invoiced);
        assert_eq!(e.invoice_id, None);
    }

    #[test]
    fn month_filter() {
        let e = entry(dec!(8), dec!(50));
        assert!(e.falls_in(1, 2024));
        assert!(!e.falls_in(2, 2024));
        assert!(!e.falls_in(1, 2023));
    }
}
