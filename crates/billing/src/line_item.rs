use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_core::{DomainResult, DomainError, ValueObject};

/// Unit of measure for an item/document: hours, days, or plain quantity.
///
/// The parent document's billing type selects which of a line item's metric
/// fields is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    Hours,
    Days,
    Quantity,
}

impl core::fmt::Display for BillingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            BillingType::Hours => "hours",
            BillingType::Days => "days",
            BillingType::Quantity => "quantity",
        };
        f.write_str(s)
    }
}

/// One billable line of a document.
///
/// Exactly one of `quantity`/`hours`/`days` is meaningful, selected by the
/// parent document's [`BillingType`]; the other two stay zero. `total` is the
/// item's net amount, filled by [`crate::totals::price_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub hours: Decimal,
    pub days: Decimal,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    /// Item-level tax percentage; only consulted under the per-item policy.
    pub tax_pct: Option<Decimal>,
    pub total: Decimal,
}

impl ValueObject for LineItem {}

impl LineItem {
    /// New line item with the metric slot chosen by `billing_type`.
    pub fn new(
        description: impl Into<String>,
        billing_type: BillingType,
        metric: Decimal,
        unit_price: Decimal,
    ) -> Self {
        let mut item = Self {
            description: description.into(),
            quantity: Decimal::ZERO,
            hours: Decimal::ZERO,
            days: Decimal::ZERO,
            unit_price,
            discount_pct: Decimal::ZERO,
            tax_pct: None,
            total: Decimal::ZERO,
        };
        match billing_type {
            BillingType::Hours => item.hours = metric,
            BillingType::Days => item.days = metric,
            BillingType::Quantity => item.quantity = metric,
        }
        item
    }

    pub fn with_discount(mut self, discount_pct: Decimal) -> Self {
        self.discount_pct = discount_pct;
        self
    }

    pub fn with_tax(mut self, tax_pct: Decimal) -> Self {
        self.tax_pct = Some(tax_pct);
        self
    }

    /// Metric resolved by the document's billing type.
    pub fn metric(&self, billing_type: BillingType) -> Decimal {
        match billing_type {
            BillingType::Hours => self.hours,
            BillingType::Days => self.days,
            BillingType::Quantity => self.quantity,
        }
    }

    /// Boundary validation; the calculator assumes inputs already passed it.
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::validation("unit price must not be negative"));
        }
        for (name, metric) in [
            ("quantity", self.quantity),
            ("hours", self.hours),
            ("days", self.days),
        ] {
            if metric < Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "{name} must not be negative"
                )));
            }
        }
        validate_pct("discount", self.discount_pct)?;
        if let Some(tax) = self.tax_pct {
            validate_pct("tax", tax)?;
        }
        Ok(())
    }
}

/// Percentages are 0–100 throughout the engine.
pub fn validate_pct(name: &str, value: Decimal) -> DomainResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation(format!(
            "{name} percentage must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn metric_follows_billing_type() {
        let item = LineItem::new("crane hire", BillingType::Hours, dec!(8), dec!(120));
        assert_eq!(item.metric(BillingType::Hours), dec!(8));
        assert_eq!(item.metric(BillingType::Days), Decimal::ZERO);
        assert_eq!(item.metric(BillingType::Quantity), Decimal::ZERO);
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let item = LineItem::new("flatbed", BillingType::Days, dec!(2), dec!(900))
            .with_discount(dec!(120));
        assert!(matches!(
            item.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn negative_tax_is_rejected() {
        let item =
            LineItem::new("flatbed", BillingType::Days, dec!(2), dec!(900)).with_tax(dec!(-5));
        assert!(matches!(item.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn zero_metric_and_price_are_valid() {
        let item = LineItem::new("standby", BillingType::Quantity, Decimal::ZERO, Decimal::ZERO);
        assert!(item.validate().is_ok());
    }
}
