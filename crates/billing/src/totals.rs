//! Document totals aggregation.
//!
//! Two tax-attribution policies exist side by side, keyed by document kind:
//! quotations and purchase orders assess tax per item, invoices assess one
//! flat rate on the document subtotal. The duality is inherited product
//! behavior and is deliberately kept as a tagged policy rather than unified.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_core::{DomainResult, ValueObject};

use crate::calculator::line_amounts;
use crate::line_item::{BillingType, LineItem, validate_pct};

/// How a document attributes tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "rate", rename_all = "snake_case")]
pub enum TaxPolicy {
    /// Each item's own `tax_pct` applies (quotations, purchase orders).
    PerItem,
    /// One document-level rate on the subtotal (invoices).
    FlatRate(Decimal),
}

/// Subtotal / tax / total of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl ValueObject for DocumentTotals {}

impl DocumentTotals {
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Aggregate items into document totals under `policy`.
///
/// The subtotal is the sum of after-discount amounts under both policies;
/// only tax attribution differs. An empty item list yields all-zero totals.
/// Validation failures are raised before the caller mutates anything.
pub fn compute_document_totals(
    items: &[LineItem],
    billing_type: BillingType,
    policy: &TaxPolicy,
) -> DomainResult<DocumentTotals> {
    if let TaxPolicy::FlatRate(rate) = policy {
        validate_pct("document tax", *rate)?;
    }
    for item in items {
        item.validate()?;
    }

    let mut subtotal = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    match policy {
        TaxPolicy::PerItem => {
            for item in items {
                let amounts = line_amounts(item, billing_type, policy);
                subtotal += amounts.after_discount;
                tax_amount += amounts.tax;
            }
        }
        TaxPolicy::FlatRate(rate) => {
            for item in items {
                let amounts = line_amounts(item, billing_type, policy);
                subtotal += amounts.after_discount;
            }
            tax_amount = subtotal * *rate / Decimal::ONE_HUNDRED;
        }
    }

    Ok(DocumentTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    })
}

/// Aggregate like [`compute_document_totals`] and also fill each item's
/// `total` with its net amount. Items are untouched if validation fails.
pub fn price_items(
    items: &mut [LineItem],
    billing_type: BillingType,
    policy: &TaxPolicy,
) -> DomainResult<DocumentTotals> {
    let totals = compute_document_totals(items, billing_type, policy)?;
    for item in items.iter_mut() {
        item.total = line_amounts(item, billing_type, policy).net;
    }
    Ok(totals)
}
