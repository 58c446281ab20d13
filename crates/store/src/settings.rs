use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Company-level billing settings: document number prefixes and the tax rate
/// applied when a request does not name one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub quotation_prefix: String,
    pub purchase_order_prefix: String,
    pub invoice_prefix: String,
    pub receipt_prefix: String,
    pub project_prefix: String,
    pub default_tax_rate: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quotation_prefix: "QUO".to_string(),
            purchase_order_prefix: "PO".to_string(),
            invoice_prefix: "INV".to_string(),
            receipt_prefix: "REC".to_string(),
            project_prefix: "PRJ".to_string(),
            default_tax_rate: Decimal::from(5),
        }
    }
}

/// Settings access used by the engine.
pub trait SettingsStore: Send + Sync {
    fn get(&self) -> Settings;
}

impl<S> SettingsStore for Arc<S>
where
    S: SettingsStore + ?Sized,
{
    fn get(&self) -> Settings {
        (**self).get()
    }
}

/// In-memory settings store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    inner: RwLock<Settings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    pub fn set(&self, settings: Settings) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = settings;
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self) -> Settings {
        match self.inner.read() {
            Ok(inner) => inner.clone(),
            Err(_) => Settings::default(),
        }
    }
}
