use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fleetbill_billing::DocumentKind;

/// Strictly monotonic per-kind counter backing document numbers.
///
/// The old scheme suffixed numbers with the last six digits of a millisecond
/// timestamp, which can collide under concurrent calls; uniqueness now lives
/// behind this trait while the number layout stays a pure formatting step.
pub trait NumberSequence: Send + Sync {
    /// Next value for `kind`, starting at 1. Never repeats for a kind.
    fn next(&self, kind: DocumentKind) -> u64;
}

impl<S> NumberSequence for Arc<S>
where
    S: NumberSequence + ?Sized,
{
    fn next(&self, kind: DocumentKind) -> u64 {
        (**self).next(kind)
    }
}

/// In-memory per-kind counters.
#[derive(Debug, Default)]
pub struct InMemoryNumberSequence {
    counters: Mutex<HashMap<DocumentKind, u64>>,
}

impl InMemoryNumberSequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberSequence for InMemoryNumberSequence {
    fn next(&self, kind: DocumentKind) -> u64 {
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let counter = counters.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }
}
