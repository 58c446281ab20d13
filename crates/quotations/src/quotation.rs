use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_billing::{BillingType, LineItem, TaxPolicy, price_items};
use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::CustomerId;

define_id!(
    /// Quotation identifier.
    QuotationId
);

/// Quotation status lifecycle.
///
/// `draft → sent → {accepted | rejected}`; any live state can expire via an
/// external time-based check. All transitions are externally triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

/// A quotation offered to a customer. Totals use the per-item tax policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: QuotationId,
    pub number: String,
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub billing_type: BillingType,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    /// Default document rate, carried onto invoices created from this
    /// quotation. Quotation totals themselves are assessed per item.
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub status: QuotationStatus,
}

impl Quotation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuotationId,
        number: impl Into<String>,
        customer_id: CustomerId,
        date: DateTime<Utc>,
        valid_until: Option<DateTime<Utc>>,
        billing_type: BillingType,
        tax_rate: Decimal,
        items: Vec<LineItem>,
    ) -> DomainResult<Self> {
        let mut quotation = Self {
            id,
            number: number.into(),
            customer_id,
            date,
            valid_until,
            billing_type,
            items,
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            status: QuotationStatus::Draft,
        };
        quotation.recompute_totals()?;
        Ok(quotation)
    }

    /// Replace the line items; only allowed while still a draft.
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> DomainResult<()> {
        if self.status != QuotationStatus::Draft {
            return Err(DomainError::conflict(
                "only draft quotations can be edited",
            ));
        }
        let previous = std::mem::replace(&mut self.items, items);
        if let Err(e) = self.recompute_totals() {
            self.items = previous;
            return Err(e);
        }
        Ok(())
    }

    fn recompute_totals(&mut self) -> DomainResult<()> {
        let totals = price_items(&mut self.items, self.billing_type, &TaxPolicy::PerItem)?;
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        Ok(())
    }

    pub fn send(&mut self) -> DomainResult<()> {
        match self.status {
            QuotationStatus::Draft => {
                self.status = QuotationStatus::Sent;
                Ok(())
            }
            other => Err(invalid_transition(other, "send")),
        }
    }

    pub fn accept(&mut self) -> DomainResult<()> {
        match self.status {
            QuotationStatus::Sent => {
                self.status = QuotationStatus::Accepted;
                Ok(())
            }
            other => Err(invalid_transition(other, "accept")),
        }
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        match self.status {
            QuotationStatus::Sent => {
                self.status = QuotationStatus::Rejected;
                Ok(())
            }
            other => Err(invalid_transition(other, "reject")),
        }
    }

    /// External time-based check; reachable from any non-expired state.
    pub fn expire(&mut self) -> DomainResult<()> {
        match self.status {
            QuotationStatus::Expired => Err(invalid_transition(QuotationStatus::Expired, "expire")),
            _ => {
                self.status = QuotationStatus::Expired;
                Ok(())
            }
        }
    }
}

fn invalid_transition(status: QuotationStatus, action: &str) -> DomainError {
    DomainError::conflict(format!("cannot {action} a {status:?} quotation"))
}

impl Entity for Quotation {
    type Id = QuotationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Quotation {
        let items = vec![
            LineItem::new("prime mover", BillingType::Hours, dec!(250), dec!(51.923))
                .with_tax(dec!(5)),
        ];
        Quotation::new(
            QuotationId::new(),
            "QUO-2024-01-000001",
            CustomerId::new(),
            Utc::now(),
            None,
            BillingType::Hours,
            dec!(5),
            items,
        )
        .unwrap()
    }

    #[test]
    fn totals_use_per_item_policy() {
        let q = sample();
        assert_eq!(q.subtotal, dec!(12980.750));
        assert_eq!(q.tax_amount, dec!(649.03750));
        assert_eq!(q.total, dec!(13629.78750));
        assert_eq!(q.items[0].total, dec!(13629.78750));
    }

    #[test]
    fn happy_path_transitions() {
        let mut q = sample();
        assert_eq!(q.status, QuotationStatus::Draft);
        q.send().unwrap();
        assert_eq!(q.status, QuotationStatus::Sent);
        q.accept().unwrap();
        assert_eq!(q.status, QuotationStatus::Accepted);
    }

    #[test]
    fn cannot_accept_a_draft() {
        let mut q = sample();
        let err = q.accept().unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(q.status, QuotationStatus::Draft);
    }

    #[test]
    fn any_live_state_can_expire_once() {
        let mut q = sample();
        q.send().unwrap();
        q.accept().unwrap();
        q.expire().unwrap();
        assert_eq!(q.status, QuotationStatus::Expired);
        assert!(q.expire().is_err());
    }

    #[test]
    fn editing_after_send_is_rejected() {
        let mut q = sample();
        q.send().unwrap();
        let err = q.replace_items(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn failed_edit_keeps_previous_items_and_totals() {
        let mut q = sample();
        let bad = vec![
            LineItem::new("bad", BillingType::Hours, dec!(1), dec!(10)).with_discount(dec!(200)),
        ];
        assert!(q.replace_items(bad).is_err());
        assert_eq!(q.items.len(), 1);
        assert_eq!(q.total, dec!(13629.78750));
    }
}
