use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_billing::{BillingType, LineItem, TaxPolicy, price_items};
use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::{CustomerId, VendorId};
use fleetbill_quotations::{Quotation, QuotationId};

define_id!(
    /// Purchase order identifier.
    PurchaseOrderId
);

/// Purchase order status lifecycle.
///
/// `draft → pending → approved → received`; `cancelled` is reachable from
/// any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Draft,
    Pending,
    Approved,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Received | Self::Cancelled)
    }
}

/// A purchase order, either raised against a vendor or received from a
/// customer (one counterparty is always set). Totals use the per-item tax
/// policy, like quotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub number: String,
    pub vendor_id: Option<VendorId>,
    pub customer_id: Option<CustomerId>,
    pub quotation_id: Option<QuotationId>,
    pub date: DateTime<Utc>,
    pub billing_type: BillingType,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PurchaseOrderId,
        number: impl Into<String>,
        vendor_id: Option<VendorId>,
        customer_id: Option<CustomerId>,
        date: DateTime<Utc>,
        billing_type: BillingType,
        tax_rate: Decimal,
        items: Vec<LineItem>,
    ) -> DomainResult<Self> {
        if vendor_id.is_none() && customer_id.is_none() {
            return Err(DomainError::validation(
                "purchase order needs a vendor or a customer",
            ));
        }
        let mut order = Self {
            id,
            number: number.into(),
            vendor_id,
            customer_id,
            quotation_id: None,
            date,
            billing_type,
            items,
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            status: PurchaseOrderStatus::Draft,
        };
        order.recompute_totals()?;
        Ok(order)
    }

    /// Chain from a quotation: billing fields are copied once, no live sync.
    pub fn from_quotation(
        id: PurchaseOrderId,
        number: impl Into<String>,
        quotation: &Quotation,
        date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let mut order = Self::new(
            id,
            number,
            None,
            Some(quotation.customer_id),
            date,
            quotation.billing_type,
            quotation.tax_rate,
            quotation.items.clone(),
        )?;
        order.quotation_id = Some(quotation.id);
        Ok(order)
    }

    fn recompute_totals(&mut self) -> DomainResult<()> {
        let totals = price_items(&mut self.items, self.billing_type, &TaxPolicy::PerItem)?;
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        Ok(())
    }

    pub fn submit(&mut self) -> DomainResult<()> {
        self.step(PurchaseOrderStatus::Draft, PurchaseOrderStatus::Pending, "submit")
    }

    pub fn approve(&mut self) -> DomainResult<()> {
        self.step(PurchaseOrderStatus::Pending, PurchaseOrderStatus::Approved, "approve")
    }

    pub fn receive(&mut self) -> DomainResult<()> {
        self.step(PurchaseOrderStatus::Approved, PurchaseOrderStatus::Received, "receive")
    }

    /// Allowed from any non-terminal state.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "cannot cancel a {:?} purchase order",
                self.status
            )));
        }
        self.status = PurchaseOrderStatus::Cancelled;
        Ok(())
    }

    fn step(
        &mut self,
        from: PurchaseOrderStatus,
        to: PurchaseOrderStatus,
        action: &str,
    ) -> DomainResult<()> {
        if self.status != from {
            return Err(DomainError::conflict(format!(
                "cannot {action} a {:?} purchase order",
                self.status
            )));
        }
        self.status = to;
        Ok(())
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> PurchaseOrder {
        let items =
            vec![LineItem::new("lowbed trailer", BillingType::Days, dec!(5), dec!(800))
                .with_tax(dec!(5))];
        PurchaseOrder::new(
            PurchaseOrderId::new(),
            "PO-2024-02-000003",
            Some(VendorId::new()),
            None,
            Utc::now(),
            BillingType::Days,
            dec!(5),
            items,
        )
        .unwrap()
    }

    #[test]
    fn needs_a_counterparty() {
        let err = PurchaseOrder::new(
            PurchaseOrderId::new(),
            "PO-X",
            None,
            None,
            Utc::now(),
            BillingType::Quantity,
            dec!(5),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn full_lifecycle() {
        let mut po = sample();
        po.submit().unwrap();
        po.approve().unwrap();
        po.receive().unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Received);
    }

    #[test]
    fn cancel_is_blocked_once_terminal() {
        let mut po = sample();
        po.submit().unwrap();
        po.cancel().unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Cancelled);
        assert!(po.cancel().is_err());
    }

    #[test]
    fn approve_requires_pending() {
        let mut po = sample();
        let err = po.approve().unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn from_quotation_copies_billing_fields() {
        let quotation = Quotation::new(
            QuotationId::new(),
            "QUO-2024-02-000009",
            CustomerId::new(),
            Utc::now(),
            None,
            BillingType::Hours,
            dec!(5),
            vec![LineItem::new("crane", BillingType::Hours, dec!(12), dec!(300)).with_tax(dec!(5))],
        )
        .unwrap();

        let po = PurchaseOrder::from_quotation(
            PurchaseOrderId::new(),
            "PO-2024-02-000004",
            &quotation,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(po.quotation_id, Some(quotation.id));
        assert_eq!(po.customer_id, Some(quotation.customer_id));
        assert_eq!(po.billing_type, quotation.billing_type);
        assert_eq!(po.items, quotation.items);
        assert_eq!(po.total, quotation.total);
    }
}
