//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; they
/// have no identity of their own. `DocumentTotals { 100, 5, 105 }` is the
/// same value wherever it appears, while two invoices with equal fields are
/// still distinct records.
///
/// To "modify" a value object, build a new one. The trait only requires what
/// value semantics need: `Clone`, `PartialEq`, `Debug`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
