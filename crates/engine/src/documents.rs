//! Document creation, chaining, and externally-triggered status transitions.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use fleetbill_billing::{BillingType, DocumentKind, LineItem};
use fleetbill_core::{DomainError, DomainResult};
use fleetbill_directory::{CustomerDirectory, CustomerId, VendorDirectory, VendorId};
use fleetbill_invoicing::{Invoice, InvoiceId};
use fleetbill_purchasing::{PurchaseOrder, PurchaseOrderId};
use fleetbill_quotations::{Quotation, QuotationId};
use fleetbill_store::SettingsStore;

use crate::SharedStore;
use crate::numbers::DocumentNumbers;

/// Default payment terms for invoices that do not name a due date.
const NET_DAYS: i64 = 30;

pub struct NewQuotation {
    pub customer_id: CustomerId,
    pub valid_until: Option<DateTime<Utc>>,
    pub billing_type: BillingType,
    /// Falls back to the settings default when absent.
    pub tax_rate: Option<Decimal>,
    pub items: Vec<LineItem>,
}

pub struct NewPurchaseOrder {
    /// When set, billing fields are copied from the quotation and the other
    /// fields below are ignored.
    pub quotation_id: Option<QuotationId>,
    pub vendor_id: Option<VendorId>,
    pub customer_id: Option<CustomerId>,
    pub billing_type: BillingType,
    pub tax_rate: Option<Decimal>,
    pub items: Vec<LineItem>,
}

pub struct NewInvoice {
    /// Chaining sources, tried in order: quotation, then purchase order.
    pub quotation_id: Option<QuotationId>,
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub customer_id: Option<CustomerId>,
    pub due_date: Option<DateTime<Utc>>,
    pub billing_type: BillingType,
    pub tax_rate: Option<Decimal>,
    pub items: Vec<LineItem>,
}

/// Creates and transitions quotations, purchase orders, and invoices.
pub struct DocumentService {
    quotations: SharedStore<Quotation>,
    purchase_orders: SharedStore<PurchaseOrder>,
    invoices: SharedStore<Invoice>,
    customers: Arc<dyn CustomerDirectory>,
    vendors: Arc<dyn VendorDirectory>,
    numbers: Arc<DocumentNumbers>,
    settings: Arc<dyn SettingsStore>,
}

impl DocumentService {
    pub fn new(
        quotations: SharedStore<Quotation>,
        purchase_orders: SharedStore<PurchaseOrder>,
        invoices: SharedStore<Invoice>,
        customers: Arc<dyn CustomerDirectory>,
        vendors: Arc<dyn VendorDirectory>,
        numbers: Arc<DocumentNumbers>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            quotations,
            purchase_orders,
            invoices,
            customers,
            vendors,
            numbers,
            settings,
        }
    }

    fn default_tax_rate(&self, requested: Option<Decimal>) -> Decimal {
        requested.unwrap_or_else(|| self.settings.get().default_tax_rate)
    }

    pub fn create_quotation(
        &self,
        req: NewQuotation,
        now: DateTime<Utc>,
    ) -> DomainResult<Quotation> {
        self.customers
            .get(&req.customer_id)
            .ok_or(DomainError::NotFound)?;
        let quotation = Quotation::new(
            QuotationId::new(),
            self.numbers.generate(DocumentKind::Quotation, now),
            req.customer_id,
            now,
            req.valid_until,
            req.billing_type,
            self.default_tax_rate(req.tax_rate),
            req.items,
        )?;
        tracing::info!(quotation = %quotation.number, "quotation created");
        self.quotations.create(quotation)
    }

    /// Replace a draft quotation's items and reprice it.
    pub fn replace_quotation_items(
        &self,
        id: &QuotationId,
        items: Vec<LineItem>,
    ) -> DomainResult<Quotation> {
        self.quotations.update(id, &|q| q.replace_items(items.clone()))
    }

    pub fn send_quotation(&self, id: &QuotationId) -> DomainResult<Quotation> {
        self.quotations.update(id, &|q| q.send())
    }

    pub fn accept_quotation(&self, id: &QuotationId) -> DomainResult<Quotation> {
        self.quotations.update(id, &|q| q.accept())
    }

    pub fn reject_quotation(&self, id: &QuotationId) -> DomainResult<Quotation> {
        self.quotations.update(id, &|q| q.reject())
    }

    pub fn expire_quotation(&self, id: &QuotationId) -> DomainResult<Quotation> {
        self.quotations.update(id, &|q| q.expire())
    }

    pub fn create_purchase_order(
        &self,
        req: NewPurchaseOrder,
        now: DateTime<Utc>,
    ) -> DomainResult<PurchaseOrder> {
        let number = self.numbers.generate(DocumentKind::PurchaseOrder, now);
        let order = match req.quotation_id {
            Some(quotation_id) => {
                let quotation = self
                    .quotations
                    .get(&quotation_id)
                    .ok_or(DomainError::NotFound)?;
                PurchaseOrder::from_quotation(PurchaseOrderId::new(), number, &quotation, now)?
            }
            None => {
                if let Some(vendor_id) = req.vendor_id {
                    self.vendors.get(&vendor_id).ok_or(DomainError::NotFound)?;
                }
                if let Some(customer_id) = req.customer_id {
                    self.customers
                        .get(&customer_id)
                        .ok_or(DomainError::NotFound)?;
                }
                PurchaseOrder::new(
                    PurchaseOrderId::new(),
                    number,
                    req.vendor_id,
                    req.customer_id,
                    now,
                    req.billing_type,
                    self.default_tax_rate(req.tax_rate),
                    req.items,
                )?
            }
        };
        tracing::info!(purchase_order = %order.number, "purchase order created");
        self.purchase_orders.create(order)
    }

    pub fn submit_purchase_order(&self, id: &PurchaseOrderId) -> DomainResult<PurchaseOrder> {
        self.purchase_orders.update(id, &|po| po.submit())
    }

    pub fn approve_purchase_order(&self, id: &PurchaseOrderId) -> DomainResult<PurchaseOrder> {
        self.purchase_orders.update(id, &|po| po.approve())
    }

    pub fn receive_purchase_order(&self, id: &PurchaseOrderId) -> DomainResult<PurchaseOrder> {
        self.purchase_orders.update(id, &|po| po.receive())
    }

    pub fn cancel_purchase_order(&self, id: &PurchaseOrderId) -> DomainResult<PurchaseOrder> {
        self.purchase_orders.update(id, &|po| po.cancel())
    }

    pub fn create_invoice(&self, req: NewInvoice, now: DateTime<Utc>) -> DomainResult<Invoice> {
        let number = self.numbers.generate(DocumentKind::Invoice, now);
        let due_date = req.due_date.unwrap_or(now + Duration::days(NET_DAYS));
        let invoice = if let Some(quotation_id) = req.quotation_id {
            let quotation = self
                .quotations
                .get(&quotation_id)
                .ok_or(DomainError::NotFound)?;
            Invoice::from_quotation(InvoiceId::new(), number, &quotation, now, due_date)?
        } else if let Some(purchase_order_id) = req.purchase_order_id {
            let order = self
                .purchase_orders
                .get(&purchase_order_id)
                .ok_or(DomainError::NotFound)?;
            Invoice::from_purchase_order(InvoiceId::new(), number, &order, now, due_date)?
        } else {
            let customer_id = req
                .customer_id
                .ok_or_else(|| DomainError::validation("invoice needs a customer"))?;
            self.customers
                .get(&customer_id)
                .ok_or(DomainError::NotFound)?;
            Invoice::new(
                InvoiceId::new(),
                number,
                customer_id,
                now,
                due_date,
                req.billing_type,
                self.default_tax_rate(req.tax_rate),
                req.items,
            )?
        };
        tracing::info!(invoice = %invoice.number, "invoice created");
        self.invoices.create(invoice)
    }

    pub fn send_invoice(&self, id: &InvoiceId) -> DomainResult<Invoice> {
        self.invoices.update(id, &|i| i.mark_sent())
    }

    pub fn cancel_invoice(&self, id: &InvoiceId) -> DomainResult<Invoice> {
        self.invoices.update(id, &|i| i.cancel())
    }
}
