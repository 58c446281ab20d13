//! `fleetbill-purchasing` — purchase orders and their status machine.

pub mod order;

pub use order::{PurchaseOrder, PurchaseOrderId, PurchaseOrderStatus};
