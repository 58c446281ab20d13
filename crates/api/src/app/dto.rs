//! Request DTOs and JSON mapping helpers.
//!
//! Entities serialize directly as responses; these types only shape the
//! request side.

use rust_decimal::Decimal;
use serde::Deserialize;

use fleetbill_billing::{BillingType, LineItem, TaxPolicy};
use fleetbill_invoicing::PaymentMethod;

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub description: String,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub hours: Option<Decimal>,
    #[serde(default)]
    pub days: Option<Decimal>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Option<Decimal>,
    #[serde(default)]
    pub tax_pct: Option<Decimal>,
}

impl LineItemRequest {
    pub fn into_item(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity.unwrap_or_default(),
            hours: self.hours.unwrap_or_default(),
            days: self.days.unwrap_or_default(),
            unit_price: self.unit_price,
            discount_pct: self.discount_pct.unwrap_or_default(),
            tax_pct: self.tax_pct,
            total: Decimal::ZERO,
        }
    }
}

pub fn into_items(items: Vec<LineItemRequest>) -> Vec<LineItem> {
    items.into_iter().map(LineItemRequest::into_item).collect()
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVendorRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub name: String,
    #[serde(default)]
    pub plate_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuotationRequest {
    pub customer_id: String,
    #[serde(default)]
    pub valid_until: Option<String>,
    pub billing_type: BillingType,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    #[serde(default)]
    pub quotation_id: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub billing_type: Option<BillingType>,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub quotation_id: Option<String>,
    #[serde(default)]
    pub purchase_order_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub billing_type: Option<BillingType>,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct RecordReceiptRequest {
    pub amount: Decimal,
    pub payment_date: String,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReceiptRequest {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub quotation_id: String,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AssignVehicleRequest {
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordUsageRequest {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hours: Option<Decimal>,
    #[serde(default)]
    pub days: Option<Decimal>,
    #[serde(default)]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateMonthlyInvoiceRequest {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct TotalsRequest {
    pub billing_type: BillingType,
    #[serde(flatten)]
    pub policy: TaxPolicy,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}
