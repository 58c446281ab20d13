//! `fleetbill-quotations` — quotation records and their status machine.

pub mod quotation;

pub use quotation::{Quotation, QuotationId, QuotationStatus};
