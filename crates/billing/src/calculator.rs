//! Line-item amount calculation.

use rust_decimal::Decimal;

use crate::line_item::{BillingType, LineItem};
use crate::totals::TaxPolicy;

/// Amount breakdown for a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmounts {
    /// metric × unit price, before discount and tax.
    pub gross: Decimal,
    pub discount: Decimal,
    pub after_discount: Decimal,
    pub tax: Decimal,
    /// Amount after discount and tax.
    pub net: Decimal,
}

/// Compute one item's amounts under the given tax policy.
///
/// Under [`TaxPolicy::PerItem`] the item's own `tax_pct` applies; under
/// [`TaxPolicy::FlatRate`] the item's tax field is ignored and the document
/// rate is used instead. The flat-rate per-item net is only a display value;
/// the document's tax is assessed on the subtotal, see [`crate::totals`].
///
/// A zero metric or zero unit price yields all-zero amounts; that is a valid
/// line, not an error. Inputs are assumed to have passed
/// [`LineItem::validate`].
pub fn line_amounts(item: &LineItem, billing_type: BillingType, policy: &TaxPolicy) -> LineAmounts {
    let gross = item.metric(billing_type) * item.unit_price;
    let discount = gross * item.discount_pct / Decimal::ONE_HUNDRED;
    let after_discount = gross - discount;

    let tax_pct = match policy {
        TaxPolicy::PerItem => item.tax_pct.unwrap_or(Decimal::ZERO),
        TaxPolicy::FlatRate(rate) => *rate,
    };
    let tax = after_discount * tax_pct / Decimal::ONE_HUNDRED;

    LineAmounts {
        gross,
        discount,
        after_discount,
        tax,
        net: after_discount + tax,
    }
}
