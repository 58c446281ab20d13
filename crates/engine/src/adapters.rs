//! Directory views over record stores.

use fleetbill_directory::{
    Customer, CustomerDirectory, CustomerId, Vehicle, VehicleDirectory, VehicleId, Vendor,
    VendorDirectory, VendorId,
};
use fleetbill_store::RecordStore;

/// Exposes a record store through the read-only `*Directory` traits the
/// engine consumes.
#[derive(Debug)]
pub struct StoreDirectory<S> {
    store: S,
}

impl<S> StoreDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: RecordStore<Customer>> CustomerDirectory for StoreDirectory<S> {
    fn get(&self, id: &CustomerId) -> Option<Customer> {
        self.store.get(id)
    }
}

impl<S: RecordStore<Vendor>> VendorDirectory for StoreDirectory<S> {
    fn get(&self, id: &VendorId) -> Option<Vendor> {
        self.store.get(id)
    }
}

impl<S: RecordStore<Vehicle>> VehicleDirectory for StoreDirectory<S> {
    fn get(&self, id: &VehicleId) -> Option<Vehicle> {
        self.store.get(id)
    }
}
