use serde::{Deserialize, Serialize};

use fleetbill_core::{Entity, define_id};

use crate::customer::ContactInfo;

define_id!(
    /// Vendor identifier.
    VendorId
);

/// A vendor the business raises purchase orders against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub contact: ContactInfo,
}

impl Vendor {
    pub fn new(id: VendorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            contact: ContactInfo::default(),
        }
    }

    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }
}

impl Entity for Vendor {
    type Id = VendorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only vendor lookup used by the engine.
pub trait VendorDirectory: Send + Sync {
    fn get(&self, id: &VendorId) -> Option<Vendor>;
}

impl<D> VendorDirectory for std::sync::Arc<D>
where
    D: VendorDirectory + ?Sized,
{
    fn get(&self, id: &VendorId) -> Option<Vendor> {
        (**self).get(id)
    }
}
