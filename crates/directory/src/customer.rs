use serde::{Deserialize, Serialize};

use fleetbill_core::{Entity, define_id};

define_id!(
    /// Customer identifier.
    CustomerId
);

/// Contact information for a customer or vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A customer of the transport/rental business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: ContactInfo,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
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

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only customer lookup used by the engine.
pub trait CustomerDirectory: Send + Sync {
    fn get(&self, id: &CustomerId) -> Option<Customer>;
}

impl<D> CustomerDirectory for std::sync::Arc<D>
where
    D: CustomerDirectory + ?Sized,
{
    fn get(&self, id: &CustomerId) -> Option<Customer> {
        (**self).get(id)
    }
}
