//! In-memory store
//!
//! A `HashMap`-backed [`Store`] guarded by an `RwLock`. It counts every
//! fetch so callers can verify round-trip behavior, and can be switched
//! offline to simulate transport failures.

use crate::contract::{Store, StoreId};
use crate::error::StoreError;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Store keeping records in process memory
#[derive(Debug)]
pub struct InMemoryStore<I, R> {
    records: RwLock<HashMap<I, R>>,
    batch_fetches: AtomicUsize,
    single_fetches: AtomicUsize,
    offline: AtomicBool,
}

impl<I: StoreId, R: Clone> InMemoryStore<I, R> {
    /// Create an empty store
    pub fn new() -> Self {
        InMemoryStore {
            records: RwLock::new(HashMap::new()),
            batch_fetches: AtomicUsize::new(0),
            single_fetches: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// Builder: add a record
    pub fn with_record(self, id: I, record: R) -> Self {
        self.insert(id, record);
        self
    }

    /// Insert or replace a record
    pub fn insert(&self, id: I, record: R) {
        self.records.write().insert(id, record);
    }

    /// Remove a record, returning it if present
    pub fn remove(&self, id: &I) -> Option<R> {
        self.records.write().remove(id)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if no records are stored
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of `fetch_batch` calls served so far
    pub fn batch_fetches(&self) -> usize {
        self.batch_fetches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_one` calls served so far
    pub fn single_fetches(&self) -> usize {
        self.single_fetches.load(Ordering::SeqCst)
    }

    /// Make every subsequent fetch fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::new("store is offline"));
        }
        Ok(())
    }
}

impl<I: StoreId, R: Clone> Default for InMemoryStore<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, R> Store for InMemoryStore<I, R>
where
    I: StoreId,
    R: Clone + Send + Sync,
{
    type Id = I;
    type Record = R;

    fn fetch_batch(&self, ids: &HashSet<I>) -> Result<HashMap<I, R>, StoreError> {
        self.batch_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let records = self.records.read();
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id).map(|r| (id.clone(), r.clone())))
            .collect())
    }

    fn fetch_one(&self, id: &I) -> Result<Option<R>, StoreError> {
        self.single_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.records.read().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryStore<String, u32> {
        InMemoryStore::new()
            .with_record("a".to_string(), 1)
            .with_record("b".to_string(), 2)
    }

    #[test]
    fn test_batch_returns_only_found() {
        let store = store();
        let ids: HashSet<String> = ["a", "z"].iter().map(|s| s.to_string()).collect();
        let found = store.fetch_batch(&ids).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.get("a"), Some(&1));
        assert_eq!(store.batch_fetches(), 1);
    }

    #[test]
    fn test_fetch_one() {
        let store = store();
        assert_eq!(store.fetch_one(&"b".to_string()).unwrap(), Some(2));
        assert_eq!(store.fetch_one(&"z".to_string()).unwrap(), None);
        assert_eq!(store.single_fetches(), 2);
    }

    #[test]
    fn test_offline_fails_fetches() {
        let store = store();
        store.set_offline(true);
        assert!(store.fetch_one(&"a".to_string()).is_err());
        assert!(store.fetch_batch(&HashSet::new()).is_err());
        store.set_offline(false);
        assert!(store.fetch_one(&"a".to_string()).is_ok());
    }

    #[test]
    fn test_insert_remove() {
        let store = store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.remove(&"a".to_string()), Some(1));
        assert_eq!(store.len(), 1);
        store.insert("c".to_string(), 3);
        assert!(!store.is_empty());
    }
}
