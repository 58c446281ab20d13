use std::collections::HashMap;
use std::sync::RwLock;

use fleetbill_core::{DomainError, DomainResult, Entity};

use crate::record::RecordStore;

/// In-memory record store.
///
/// Intended for tests/dev and single-process deployments. Not optimized for
/// performance.
#[derive(Debug)]
pub struct InMemoryStore<T: Entity> {
    records: RwLock<HashMap<T::Id, T>>,
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: Entity + Clone + Send + Sync + 'static,
    T::Id: Send + Sync,
{
    fn all(&self) -> Vec<T> {
        match self.records.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn get(&self, id: &T::Id) -> Option<T> {
        let map = self.records.read().ok()?;
        map.get(id).cloned()
    }

    fn create(&self, record: T) -> DomainResult<T> {
        let mut map = self
            .records
            .write()
            .map_err(|_| DomainError::inconsistent("store lock poisoned"))?;
        if map.contains_key(record.id()) {
            return Err(DomainError::conflict("record already exists"));
        }
        map.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, id: &T::Id, patch: &dyn Fn(&mut T) -> DomainResult<()>) -> DomainResult<T> {
        let mut map = self
            .records
            .write()
            .map_err(|_| DomainError::inconsistent("store lock poisoned"))?;
        let record = map.get_mut(id).ok_or(DomainError::NotFound)?;

        // Patch a copy so a failing patch leaves the stored record untouched.
        let mut updated = record.clone();
        patch(&mut updated)?;
        *record = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: &T::Id) -> bool {
        match self.records.write() {
            Ok(mut map) => map.remove(id).is_some(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetbill_core::define_id;

    define_id!(NoteId);

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: NoteId,
        body: String,
    }

    impl Entity for Note {
        type Id = NoteId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: NoteId::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn create_get_delete_round_trip() {
        let store = InMemoryStore::new();
        let n = store.create(note("first")).unwrap();
        assert_eq!(store.get(&n.id), Some(n.clone()));
        assert!(store.delete(&n.id));
        assert_eq!(store.get(&n.id), None);
        assert!(!store.delete(&n.id));
    }

    #[test]
    fn duplicate_create_is_a_conflict() {
        let store = InMemoryStore::new();
        let n = store.create(note("first")).unwrap();
        let err = store.create(n).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_returns_the_patched_record() {
        let store = InMemoryStore::new();
        let n = store.create(note("before")).unwrap();
        let updated = store
            .update(&n.id, &|note| {
                note.body = "after".to_string();
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.body, "after");
        assert_eq!(store.get(&n.id).unwrap().body, "after");
    }

    #[test]
    fn failing_patch_leaves_the_record_unchanged() {
        let store = InMemoryStore::new();
        let n = store.create(note("before")).unwrap();
        let err = store
            .update(&n.id, &|note| {
                note.body = "half-done".to_string();
                Err(DomainError::validation("nope"))
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.get(&n.id).unwrap().body, "before");
    }

    #[test]
    fn update_of_missing_record_is_not_found() {
        let store: InMemoryStore<Note> = InMemoryStore::new();
        let err = store.update(&NoteId::new(), &|_| Ok(())).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
