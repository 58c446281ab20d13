//! Receipt handling and payment reconciliation.
//!
//! Every receipt mutation re-runs the full reconciliation for its invoice.
//! Reconciliation reads all receipts and writes back `paid_amount`/status,
//! so writes against the same invoice are serialized by a per-invoice lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use fleetbill_billing::DocumentKind;
use fleetbill_core::{DomainError, DomainResult};
use fleetbill_invoicing::{Invoice, InvoiceId, PaymentMethod, Receipt, ReceiptId, reconcile};

use crate::SharedStore;
use crate::numbers::DocumentNumbers;

pub struct ReceiptService {
    invoices: SharedStore<Invoice>,
    receipts: SharedStore<Receipt>,
    numbers: Arc<DocumentNumbers>,
    locks: Mutex<HashMap<InvoiceId, Arc<Mutex<()>>>>,
}

impl ReceiptService {
    pub fn new(
        invoices: SharedStore<Invoice>,
        receipts: SharedStore<Receipt>,
        numbers: Arc<DocumentNumbers>,
    ) -> Self {
        Self {
            invoices,
            receipts,
            numbers,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Record a payment against an invoice and reconcile it.
    pub fn record(
        &self,
        invoice_id: &InvoiceId,
        amount: Decimal,
        payment_date: NaiveDate,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> DomainResult<Receipt> {
        let invoice = self.invoices.get(invoice_id).ok_or(DomainError::NotFound)?;

        let lock = self.lock_for(*invoice_id);
        let _guard = hold(&lock);

        let receipt = Receipt::new(
            ReceiptId::new(),
            self.numbers.generate(DocumentKind::Receipt, now),
            *invoice_id,
            invoice.customer_id,
            amount,
            payment_date,
            method,
        )?;
        let receipt = self.receipts.create(receipt)?;
        self.reconcile_locked(invoice_id, now)?;
        tracing::info!(receipt = %receipt.number, invoice = %invoice.number, "receipt recorded");
        Ok(receipt)
    }

    /// Correct a receipt's amount and reconcile its invoice.
    pub fn update_amount(
        &self,
        receipt_id: &ReceiptId,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> DomainResult<Receipt> {
        let receipt = self.receipts.get(receipt_id).ok_or(DomainError::NotFound)?;

        let lock = self.lock_for(receipt.invoice_id);
        let _guard = hold(&lock);

        let receipt = self.receipts.update(receipt_id, &|r| r.set_amount(amount))?;
        self.reconcile_locked(&receipt.invoice_id, now)?;
        Ok(receipt)
    }

    /// Cancel a receipt; it stops counting toward the invoice.
    pub fn cancel(&self, receipt_id: &ReceiptId, now: DateTime<Utc>) -> DomainResult<Receipt> {
        let receipt = self.receipts.get(receipt_id).ok_or(DomainError::NotFound)?;

        let lock = self.lock_for(receipt.invoice_id);
        let _guard = hold(&lock);

        let receipt = self.receipts.update(receipt_id, &|r| r.cancel())?;
        self.reconcile_locked(&receipt.invoice_id, now)?;
        Ok(receipt)
    }

    /// Remove a receipt outright and reconcile its invoice.
    pub fn delete(&self, receipt_id: &ReceiptId, now: DateTime<Utc>) -> DomainResult<()> {
        let receipt = self.receipts.get(receipt_id).ok_or(DomainError::NotFound)?;

        let lock = self.lock_for(receipt.invoice_id);
        let _guard = hold(&lock);

        if !self.receipts.delete(receipt_id) {
            return Err(DomainError::NotFound);
        }
        self.reconcile_locked(&receipt.invoice_id, now)?;
        Ok(())
    }

    /// Re-derive an invoice's paid amount and status from its receipts.
    /// Also the entry point for external overdue sweeps.
    pub fn reconcile_invoice(
        &self,
        invoice_id: &InvoiceId,
        now: DateTime<Utc>,
    ) -> DomainResult<Invoice> {
        let lock = self.lock_for(*invoice_id);
        let _guard = hold(&lock);
        self.reconcile_locked(invoice_id, now)
    }

    fn reconcile_locked(
        &self,
        invoice_id: &InvoiceId,
        now: DateTime<Utc>,
    ) -> DomainResult<Invoice> {
        let receipts: Vec<Receipt> = self
            .receipts
            .all()
            .into_iter()
            .filter(|r| r.invoice_id == *invoice_id)
            .collect();
        self.invoices.update(invoice_id, &|invoice| {
            reconcile(invoice, &receipts, now);
            Ok(())
        })
    }

    fn lock_for(&self, invoice_id: InvoiceId) -> Arc<Mutex<()>> {
        let mut locks = match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(invoice_id).or_default().clone()
    }
}

fn hold(lock: &Mutex<()>) -> std::sync::MutexGuard<'_, ()> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
