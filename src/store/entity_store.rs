//! In-memory collection for one entity type.

use crate::entities::Entity;
use crate::error::{CrmError, Result};
use crate::types::RecordId;
use parking_lot::RwLock;
use std::collections::HashSet;

struct Inner<T> {
    records: Vec<T>,
    /// Largest identifier currently stored.
    max_id: Option<RecordId>,
}

impl<T: Entity> Inner<T> {
    fn from_records(records: Vec<T>) -> Self {
        let max_id = records.iter().map(|r| r.id()).max();
        Self { records, max_id }
    }

    fn next_id(&self) -> Option<RecordId> {
        match self.max_id {
            Some(max) => max.next(),
            None => Some(RecordId::FIRST),
        }
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

/// Owned, insertion-ordered collection of records.
///
/// New identifiers are one greater than the largest identifier currently
/// stored, or 1 for an empty store. Assignment happens under the write
/// lock, so concurrent inserts from several threads never collide.
/// Every read hands out clones; callers cannot reach the stored records.
pub struct EntityStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::from_records(Vec::new())),
        }
    }

    /// Create a store holding `records`, rejecting duplicate identifiers.
    pub fn seeded(records: Vec<T>) -> Result<Self> {
        ensure_unique(&records)?;
        Ok(Self {
            inner: RwLock::new(Inner::from_records(records)),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// Copy of every record, in stored order.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().records.clone()
    }

    /// Copy of one record.
    pub fn get(&self, id: RecordId) -> Option<T> {
        let inner = self.inner.read();
        inner.position(id).map(|i| inner.records[i].clone())
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.inner.read().position(id).is_some()
    }

    /// The identifier the next insert will receive, or `None` when the
    /// largest stored identifier is `u32::MAX`.
    pub fn next_id(&self) -> Option<RecordId> {
        self.inner.read().next_id()
    }

    /// Assign a fresh identifier, build the record with it and append it.
    ///
    /// Fails with `IdExhausted` when no identifier above the current
    /// maximum exists; `build` is not called in that case.
    pub fn insert_with<F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(RecordId) -> T,
    {
        let mut inner = self.inner.write();
        let id = inner
            .next_id()
            .ok_or(CrmError::IdExhausted { kind: T::KIND })?;

        let mut record = build(id);
        record.set_id(id);

        inner.records.push(record.clone());
        inner.max_id = Some(id);
        Ok(record)
    }

    /// Mutate one record in place and return a copy of the result.
    ///
    /// The identifier is restored after `f` runs, whatever `f` did to it.
    pub fn update_with<F, R>(&self, id: RecordId, f: F) -> Option<(T, R)>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut inner = self.inner.write();
        let index = inner.position(id)?;
        let record = &mut inner.records[index];

        let out = f(record);
        record.set_id(id);

        Some((record.clone(), out))
    }

    /// Remove one record, keeping the order of the rest.
    pub fn remove(&self, id: RecordId) -> Option<T> {
        let mut inner = self.inner.write();
        let index = inner.position(id)?;
        let removed = inner.records.remove(index);

        if inner.max_id == Some(id) {
            inner.max_id = inner.records.iter().map(|r| r.id()).max();
        }

        Some(removed)
    }

    /// Swap the whole collection, rejecting duplicate identifiers.
    ///
    /// On error the current contents are left untouched.
    pub fn replace_all(&self, records: Vec<T>) -> Result<()> {
        ensure_unique(&records)?;
        *self.inner.write() = Inner::from_records(records);
        Ok(())
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail with `DuplicateId` on the first identifier seen twice.
pub fn ensure_unique<T: Entity>(records: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CrmError::DuplicateId {
                kind: T::KIND,
                id: record.id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Contact, ContactDraft};
    use crate::types::EntityKind;
    use chrono::Utc;
    use std::sync::Arc;

    fn contact(id: u32, name: &str) -> Contact {
        Contact::from_draft(
            RecordId(id),
            ContactDraft::new(name, format!("{}@acme.io", name), "555-0100", "Acme"),
            Utc::now(),
        )
    }

    fn insert(store: &EntityStore<Contact>, name: &str) -> Contact {
        store.insert_with(|id| contact(id.0, name)).unwrap()
    }

    #[test]
    fn test_first_id_is_one() {
        let store = EntityStore::<Contact>::new();
        assert_eq!(store.next_id(), Some(RecordId(1)));
        assert_eq!(insert(&store, "ana").id, RecordId(1));
        assert_eq!(insert(&store, "ben").id, RecordId(2));
    }

    #[test]
    fn test_ids_continue_after_seed_maximum() {
        let store =
            EntityStore::seeded(vec![contact(4, "a"), contact(9, "b"), contact(2, "c")]).unwrap();
        assert_eq!(insert(&store, "d").id, RecordId(10));
    }

    #[test]
    fn test_insert_fails_once_ids_are_exhausted() {
        let store =
            EntityStore::seeded(vec![contact(1, "a"), contact(u32::MAX, "b")]).unwrap();
        assert_eq!(store.next_id(), None);

        for _ in 0..2 {
            let err = store.insert_with(|id| contact(id.0, "c")).unwrap_err();
            assert!(matches!(err, CrmError::IdExhausted { kind: EntityKind::Contact }));
        }
        let ids: Vec<_> = store.snapshot().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![RecordId(1), RecordId(u32::MAX)]);

        // Removing the top identifier frees the range again.
        store.remove(RecordId(u32::MAX)).unwrap();
        assert_eq!(store.next_id(), Some(RecordId(2)));
    }

    #[test]
    fn test_seed_rejects_duplicates() {
        let result = EntityStore::seeded(vec![contact(1, "a"), contact(1, "b")]);
        assert!(matches!(result, Err(CrmError::DuplicateId { id: RecordId(1), .. })));
    }

    #[test]
    fn test_build_cannot_pick_its_own_id() {
        let store = EntityStore::<Contact>::new();
        let record = store.insert_with(|_| contact(77, "sneaky")).unwrap();
        assert_eq!(record.id, RecordId(1));
        assert_eq!(store.get(RecordId(1)).unwrap().name, "sneaky");
    }

    #[test]
    fn test_update_restores_id() {
        let store = EntityStore::<Contact>::new();
        insert(&store, "ana");
        let (updated, _) = store
            .update_with(RecordId(1), |c| {
                c.id = RecordId(500);
                c.company = "Globex".into();
            })
            .unwrap();
        assert_eq!(updated.id, RecordId(1));
        assert_eq!(store.get(RecordId(1)).unwrap().company, "Globex");
        assert!(store.get(RecordId(500)).is_none());
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let store = EntityStore::<Contact>::new();
        insert(&store, "ana");
        let mut copy = store.snapshot();
        copy[0].name = "changed".into();
        assert_eq!(store.get(RecordId(1)).unwrap().name, "ana");
    }

    #[test]
    fn test_remove_keeps_order_and_recomputes_max() {
        let store = EntityStore::<Contact>::new();
        for name in ["a", "b", "c"] {
            insert(&store, name);
        }
        store.remove(RecordId(2)).unwrap();
        let names: Vec<_> = store.snapshot().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(store.next_id(), Some(RecordId(4)));

        store.remove(RecordId(3)).unwrap();
        assert_eq!(store.next_id(), Some(RecordId(2)));
        assert!(store.remove(RecordId(3)).is_none());
    }

    #[test]
    fn test_replace_all_is_atomic_on_error() {
        let store = EntityStore::<Contact>::new();
        insert(&store, "ana");
        let result = store.replace_all(vec![contact(5, "x"), contact(5, "y")]);
        assert!(result.is_err());
        assert_eq!(store.len(), 1);

        store.replace_all(vec![contact(5, "x")]).unwrap();
        assert_eq!(store.next_id(), Some(RecordId(6)));
    }

    #[test]
    fn test_concurrent_inserts_get_unique_ids() {
        let store = Arc::new(EntityStore::<Contact>::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store
                            .insert_with(|id| contact(id.0, &format!("t{}-{}", t, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: HashSet<_> = store.snapshot().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.next_id(), Some(RecordId(401)));
    }
}
