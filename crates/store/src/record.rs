use std::sync::Arc;

use fleetbill_core::{DomainResult, Entity};

/// CRUD-shaped persistence contract, one store per entity kind.
///
/// `update` applies the patch atomically: the stored record only changes if
/// the patch returns `Ok`, which lets domain transitions (status steps, usage
/// claims) carry their own guards through the store without extra locking at
/// the call site.
pub trait RecordStore<T: Entity>: Send + Sync {
    fn all(&self) -> Vec<T>;

    fn get(&self, id: &T::Id) -> Option<T>;

    /// Insert a new record; a duplicate id is a `Conflict`.
    fn create(&self, record: T) -> DomainResult<T>;

    /// Patch an existing record; `NotFound` if absent. Returns the updated
    /// record.
    fn update(&self, id: &T::Id, patch: &dyn Fn(&mut T) -> DomainResult<()>) -> DomainResult<T>;

    /// Remove a record; `false` if it did not exist.
    fn delete(&self, id: &T::Id) -> bool;
}

impl<T, S> RecordStore<T> for Arc<S>
where
    T: Entity,
    S: RecordStore<T> + ?Sized,
{
    fn all(&self) -> Vec<T> {
        (**self).all()
    }

    fn get(&self, id: &T::Id) -> Option<T> {
        (**self).get(id)
    }

    fn create(&self, record: T) -> DomainResult<T> {
        (**self).create(record)
    }

    fn update(&self, id: &T::Id, patch: &dyn Fn(&mut T) -> DomainResult<()>) -> DomainResult<T> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &T::Id) -> bool {
        (**self).delete(id)
    }
}
