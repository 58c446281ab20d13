use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleetbill_core::{DomainError, DomainResult, Entity, define_id};
use fleetbill_directory::CustomerId;

use crate::invoice::InvoiceId;

define_id!(
    /// Receipt identifier.
    ReceiptId
);

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Cheque,
    Card,
}

/// Receipt status: cancelled receipts stop counting toward the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Issued,
    Cancelled,
}

/// A payment received against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub number: String,
    pub invoice_id: InvoiceId,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    pub status: ReceiptStatus,
}

impl Receipt {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReceiptId,
        number: impl Into<String>,
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        amount: Decimal,
        payment_date: NaiveDate,
        method: PaymentMethod,
    ) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("receipt amount must be positive"));
        }
        Ok(Self {
            id,
            number: number.into(),
            invoice_id,
            customer_id,
            amount,
            payment_date,
            method,
            status: ReceiptStatus::Issued,
        })
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            ReceiptStatus::Issued => {
                self.status = ReceiptStatus::Cancelled;
                Ok(())
            }
            ReceiptStatus::Cancelled => {
                Err(DomainError::conflict("receipt is already cancelled"))
            }
        }
    }

    pub fn set_amount(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("receipt amount must be positive"));
        }
        self.amount = amount;
        Ok(())
    }
}

impl Entity for Receipt {
    type Id = ReceiptId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Receipt {
        Receipt::new(
            ReceiptId::new(),
            "REC-2024-01-000001",
            InvoiceId::new(),
            CustomerId::new(),
            dec!(600),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            PaymentMethod::BankTransfer,
        )
        .unwrap()
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = Receipt::new(
            ReceiptId::new(),
            "REC-X",
            InvoiceId::new(),
            CustomerId::new(),
            Decimal::ZERO,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            PaymentMethod::Cash,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cancel_is_one_way() {
        let mut receipt = sample();
        receipt.cancel().unwrap();
        assert_eq!(receipt.status, ReceiptStatus::Cancelled);
        assert!(receipt.cancel().is_err());
    }
}
