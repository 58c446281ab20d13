//! `fleetbill-store` — persistence ports and in-memory implementations.
//!
//! The engine depends only on the CRUD-shaped [`RecordStore`] contract (plus
//! [`SettingsStore`] and [`NumberSequence`]); storage technology stays
//! swappable behind these traits.

pub mod in_memory;
pub mod record;
pub mod sequence;
pub mod settings;

pub use in_memory::InMemoryStore;
pub use record::RecordStore;
pub use sequence::{InMemoryNumberSequence, NumberSequence};
pub use settings::{InMemorySettingsStore, Settings, SettingsStore};
