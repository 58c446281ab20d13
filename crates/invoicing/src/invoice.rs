use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_billing::{BillingType, LineItem, TaxPolicy, price_items};
use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::CustomerId;
use fleetbill_purchasing::{PurchaseOrder, PurchaseOrderId};
use fleetbill_quotations::{Quotation, QuotationId};

define_id!(
    /// Invoice identifier.
    InvoiceId
);

/// Invoice status lifecycle.
///
/// `draft → sent → {paid | overdue | cancelled}`. `sent`, `paid` and
/// `overdue` are derived by payment reconciliation; `draft` and `cancelled`
/// are externally set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

/// An invoice. Totals use the flat-document-rate tax policy: the per-item
/// tax fields are ignored and `tax_rate` is assessed on the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub quotation_id: Option<QuotationId>,
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub billing_type: BillingType,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    /// Derived solely from non-cancelled receipts; never set directly.
    pub paid_amount: Decimal,
    pub status: InvoiceStatus,
}

impl Invoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: InvoiceId,
        number: impl Into<String>,
        customer_id: CustomerId,
        date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        billing_type: BillingType,
        tax_rate: Decimal,
        items: Vec<LineItem>,
    ) -> DomainResult<Self> {
        let mut invoice = Self {
            id,
            number: number.into(),
            quotation_id: None,
            purchase_order_id: None,
            customer_id,
            date,
            due_date,
            billing_type,
            items,
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            status: InvoiceStatus::Draft,
        };
        invoice.recompute_totals()?;
        Ok(invoice)
    }

    /// Chain from a quotation: customer, tax rate, and items are copied once
    /// at creation time; there is no live sync afterwards.
    pub fn from_quotation(
        id: InvoiceId,
        number: impl Into<String>,
        quotation: &Quotation,
        date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let mut invoice = Self::new(
            id,
            number,
            quotation.customer_id,
            date,
            due_date,
            quotation.billing_type,
            quotation.tax_rate,
            quotation.items.clone(),
        )?;
        invoice.quotation_id = Some(quotation.id);
        Ok(invoice)
    }

    /// Chain from a purchase order. The order must carry a customer (orders
    /// raised against a vendor are not invoiced to anyone).
    pub fn from_purchase_order(
        id: InvoiceId,
        number: impl Into<String>,
        order: &PurchaseOrder,
        date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let customer_id = order.customer_id.ok_or_else(|| {
            DomainError::validation("purchase order has no customer to invoice")
        })?;
        let mut invoice = Self::new(
            id,
            number,
            customer_id,
            date,
            due_date,
            order.billing_type,
            order.tax_rate,
            order.items.clone(),
        )?;
        invoice.quotation_id = order.quotation_id;
        invoice.purchase_order_id = Some(order.id);
        Ok(invoice)
    }

    fn recompute_totals(&mut self) -> DomainResult<()> {
        let totals = price_items(
            &mut self.items,
            self.billing_type,
            &TaxPolicy::FlatRate(self.tax_rate),
        )?;
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        Ok(())
    }

    /// Externally-triggered `draft → sent` (e.g. the invoice was issued to
    /// the customer). Payments can also derive `sent`, see `reconcile`.
    pub fn mark_sent(&mut self) -> DomainResult<()> {
        match self.status {
            InvoiceStatus::Draft => {
                self.status = InvoiceStatus::Sent;
                Ok(())
            }
            other => Err(DomainError::conflict(format!(
                "cannot send a {other:?} invoice"
            ))),
        }
    }

    /// Externally set; paid invoices cannot be cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => Err(DomainError::conflict(format!(
                "cannot cancel a {:?} invoice",
                self.status
            ))),
            _ => {
                self.status = InvoiceStatus::Cancelled;
                Ok(())
            }
        }
    }

    pub fn outstanding(&self) -> Decimal {
        self.total - self.paid_amount
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Invoice {
        let items = vec![
            // Item tax field set on purpose: flat-rate policy must ignore it.
            LineItem::new("prime mover", BillingType::Hours, dec!(500), dec!(51.923))
                .with_tax(dec!(99)),
            LineItem::new("trailer", BillingType::Hours, dec!(500), dec!(51.923)),
        ];
        Invoice::new(
            InvoiceId::new(),
            "INV-2024-01-000001",
            CustomerId::new(),
            Utc::now(),
            Utc::now() + chrono::Duration::days(30),
            BillingType::Hours,
            dec!(5),
            items,
        )
        .unwrap()
    }

    #[test]
    fn totals_use_flat_document_rate() {
        let invoice = sample();
        assert_eq!(invoice.subtotal, dec!(51923.000));
        assert_eq!(invoice.tax_amount, dec!(2596.15));
        assert_eq!(invoice.total, dec!(54519.15));
    }

    #[test]
    fn send_then_cancel() {
        let mut invoice = sample();
        invoice.mark_sent().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        invoice.cancel().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Cancelled);
        assert!(invoice.mark_sent().is_err());
    }

    #[test]
    fn paid_invoice_cannot_be_cancelled() {
        let mut invoice = sample();
        invoice.status = InvoiceStatus::Paid;
        assert!(invoice.cancel().is_err());
    }

    #[test]
    fn from_quotation_copies_once() {
        let quotation = Quotation::new(
            fleetbill_quotations::QuotationId::new(),
            "QUO-2024-01-000002",
            CustomerId::new(),
            Utc::now(),
            None,
            BillingType::Days,
            dec!(5),
            vec![LineItem::new("boom truck", BillingType::Days, dec!(4), dec!(500))],
        )
        .unwrap();

        let invoice = Invoice::from_quotation(
            InvoiceId::new(),
            "INV-2024-01-000002",
            &quotation,
            Utc::now(),
            Utc::now() + chrono::Duration::days(30),
        )
        .unwrap();

        assert_eq!(invoice.quotation_id, Some(quotation.id));
        assert_eq!(invoice.customer_id, quotation.customer_id);
        assert_eq!(invoice.tax_rate, quotation.tax_rate);
        // Flat rate on the subtotal: 2000 + 5%.
        assert_eq!(invoice.total, dec!(2100.00));
    }

    #[test]
    fn vendor_only_purchase_order_cannot_be_invoiced() {
        let order = PurchaseOrder::new(
            PurchaseOrderId::new(),
            "PO-2024-01-000005",
            Some(fleetbill_directory::VendorId::new()),
            None,
            Utc::now(),
            BillingType::Quantity,
            dec!(5),
            vec![],
        )
        .unwrap();
        let err = Invoice::from_purchase_order(
            InvoiceId::new(),
            "INV-X",
            &order,
            Utc::now(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
