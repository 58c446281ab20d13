//! Payment reconciliation.
//!
//! Recomputed in full from the receipt set on every receipt mutation, never
//! incrementally, so the invoice cannot drift from its receipts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::invoice::{Invoice, InvoiceStatus};
use crate::receipt::{Receipt, ReceiptStatus};

/// Sum of non-cancelled receipt amounts belonging to `invoice`.
pub fn total_paid(invoice: &Invoice, receipts: &[Receipt]) -> Decimal {
    receipts
        .iter()
        .filter(|r| r.invoice_id == invoice.id && r.status != ReceiptStatus::Cancelled)
        .map(|r| r.amount)
        .sum()
}

/// Recompute `paid_amount` and the derived status.
///
/// Status derivation, in priority order:
/// 1. `total_paid >= total` → `paid`
/// 2. else `total_paid > 0` and current status is `draft` → `sent`
/// 3. else `due_date < now` and `total_paid < total` → `overdue`
/// 4. else unchanged.
///
/// `paid` itself is always re-derived: when receipts no longer cover the
/// total, a formerly-paid invoice falls back to its `sent` baseline before
/// the rules apply, so cancelling a receipt reverts the status. Cancelled
/// invoices only get their `paid_amount` refreshed.
///
/// Overpayment (`total_paid > total`) is not rejected here; the invoice
/// simply reports `paid` with a negative outstanding amount.
pub fn reconcile(invoice: &mut Invoice, receipts: &[Receipt], now: DateTime<Utc>) {
    let paid = total_paid(invoice, receipts);
    invoice.paid_amount = paid;

    if invoice.status == InvoiceStatus::Cancelled {
        return;
    }

    let current = if invoice.status == InvoiceStatus::Paid {
        InvoiceStatus::Sent
    } else {
        invoice.status
    };

    invoice.status = if paid >= invoice.total {
        InvoiceStatus::Paid
    } else if paid > Decimal::ZERO && current == InvoiceStatus::Draft {
        InvoiceStatus::Sent
    } else if invoice.due_date < now && paid < invoice.total {
        InvoiceStatus::Overdue
    } else {
        current
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use fleetbill_billing::{BillingType, LineItem};
    use fleetbill_core::DomainResult;
    use fleetbill_directory::CustomerId;

    use crate::invoice::InvoiceId;
    use crate::receipt::{PaymentMethod, ReceiptId};

    fn invoice_of(total_price: Decimal, due_in_days: i64) -> Invoice {
        // One unit at total_price with zero tax, so total equals the price.
        Invoice::new(
            InvoiceId::new(),
            "INV-2024-01-000009",
            CustomerId::new(),
            Utc::now(),
            Utc::now() + Duration::days(due_in_days),
            BillingType::Quantity,
            Decimal::ZERO,
            vec![LineItem::new("haulage", BillingType::Quantity, dec!(1), total_price)],
        )
        .unwrap()
    }

    fn receipt_of(invoice: &Invoice, amount: Decimal) -> DomainResult<Receipt> {
        Receipt::new(
            ReceiptId::new(),
            "REC-2024-01-000001",
            invoice.id,
            invoice.customer_id,
            amount,
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            PaymentMethod::BankTransfer,
        )
    }

    #[test]
    fn partial_then_full_then_cancel() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(1000), 30);
        assert_eq!(invoice.status, InvoiceStatus::Draft);

        let first = receipt_of(&invoice, dec!(600)).unwrap();
        reconcile(&mut invoice, &[first.clone()], now);
        assert_eq!(invoice.paid_amount, dec!(600));
        assert_eq!(invoice.status, InvoiceStatus::Sent);

        let mut second = receipt_of(&invoice, dec!(400)).unwrap();
        reconcile(&mut invoice, &[first.clone(), second.clone()], now);
        assert_eq!(invoice.paid_amount, dec!(1000));
        assert_eq!(invoice.status, InvoiceStatus::Paid);

        // Cancelling the 400 receipt reverts away from paid, back to sent.
        second.cancel().unwrap();
        reconcile(&mut invoice, &[first, second], now);
        assert_eq!(invoice.paid_amount, dec!(600));
        assert_eq!(invoice.status, InvoiceStatus::Sent);
    }

    #[test]
    fn overdue_wins_over_previously_sent() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(1000), -1);
        invoice.mark_sent().unwrap();

        let partial = receipt_of(&invoice, dec!(100)).unwrap();
        reconcile(&mut invoice, &[partial], now);
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
    }

    #[test]
    fn unpaid_draft_past_due_goes_overdue() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(500), -3);
        reconcile(&mut invoice, &[], now);
        assert_eq!(invoice.paid_amount, Decimal::ZERO);
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
    }

    #[test]
    fn receipts_for_other_invoices_never_count() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(1000), 30);
        let other = invoice_of(dec!(1000), 30);
        let stray = receipt_of(&other, dec!(1000)).unwrap();
        reconcile(&mut invoice, &[stray], now);
        assert_eq!(invoice.paid_amount, Decimal::ZERO);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
    }

    #[test]
    fn overpayment_is_kept_and_reported_paid() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(1000), 30);
        let big = receipt_of(&invoice, dec!(1500)).unwrap();
        reconcile(&mut invoice, &[big], now);
        assert_eq!(invoice.paid_amount, dec!(1500));
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.outstanding(), dec!(-500));
    }

    #[test]
    fn cancelled_invoice_only_refreshes_paid_amount() {
        let now = Utc::now();
        let mut invoice = invoice_of(dec!(1000), 30);
        invoice.cancel().unwrap();
        let r = receipt_of(&invoice, dec!(200)).unwrap();
        reconcile(&mut invoice, &[r], now);
        assert_eq!(invoice.paid_amount, dec!(200));
        assert_eq!(invoice.status, InvoiceStatus::Cancelled);
    }

    proptest! {
        /// paid_amount always equals the sum of live receipts, and the
        /// status is `paid` exactly when that sum covers the total.
        #[test]
        fn paid_amount_matches_live_receipts(
            amounts in prop::collection::vec((1u32..5_000, prop::bool::ANY), 0..8)
        ) {
            let now = Utc::now();
            let mut invoice = invoice_of(dec!(2000), 30);

            let mut receipts = Vec::new();
            let mut live_sum = Decimal::ZERO;
            for (cents, cancelled) in &amounts {
                let mut r = receipt_of(&invoice, Decimal::from(*cents)).unwrap();
                if *cancelled {
                    r.cancel().unwrap();
                } else {
                    live_sum += r.amount;
                }
                receipts.push(r);
            }

            reconcile(&mut invoice, &receipts, now);
            prop_assert_eq!(invoice.paid_amount, live_sum);
            prop_assert_eq!(
                invoice.status == InvoiceStatus::Paid,
                live_sum >= invoice.total
            );
        }
    }
}
