//! Concurrent name -> `Var` store paired with a sorted key index.
//!
//! The store (`DashMap`) and the index (`RwLock<Vec<String>>`) are guarded by
//! different locks and are not updated atomically together. Lock order is
//! index -> store; the insert paths release their store guard before touching
//! the index, so the two locks never nest the other way round.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::var::{KeyValue, Var};

#[derive(Default)]
pub(crate) struct SortedTable {
    vars: DashMap<String, Arc<dyn Var>>,
    keys: RwLock<Vec<String>>,
}

impl SortedTable {
    pub(crate) fn get(&self, key: &str) -> Option<Arc<dyn Var>> {
        self.vars.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Insert if absent. Returns the stored value and whether this call
    /// created it; only the creator touches the index.
    pub(crate) fn get_or_insert_with<F>(&self, key: &str, make: F) -> (Arc<dyn Var>, bool)
    where
        F: FnOnce() -> Arc<dyn Var>,
    {
        if let Some(v) = self.get(key) {
            return (v, false);
        }
        let (v, created) = match self.vars.entry(key.to_owned()) {
            Entry::Occupied(e) => (Arc::clone(e.get()), false),
            Entry::Vacant(e) => {
                let v = make();
                e.insert(Arc::clone(&v));
                (v, true)
            }
        };
        if created {
            self.add_key(key);
        }
        (v, created)
    }

    /// Insert or replace. A replaced key keeps its index slot.
    pub(crate) fn set(&self, key: &str, v: Arc<dyn Var>) {
        if self.store(key, v) {
            self.add_key(key);
        }
    }

    /// Store half of `set`. Returns true if this call created the key, in
    /// which case the caller owes an `add_key`.
    fn store(&self, key: &str, v: Arc<dyn Var>) -> bool {
        if let Some(mut slot) = self.vars.get_mut(key) {
            *slot = v;
            return false;
        }
        match self.vars.entry(key.to_owned()) {
            Entry::Occupied(mut e) => {
                e.insert(v);
                false
            }
            Entry::Vacant(e) => {
                e.insert(v);
                true
            }
        }
    }

    /// Binary-search insertion into the sorted index; no-op if present.
    ///
    /// Re-checks the store under the index lock: a `clear` or `delete` that ran
    /// between the store insert and this call must not leave a dangling key.
    fn add_key(&self, key: &str) {
        let mut keys = self.keys.write();
        if !self.vars.contains_key(key) {
            return;
        }
        if let Err(i) = keys.binary_search_by(|k| k.as_str().cmp(key)) {
            keys.insert(i, key.to_owned());
        }
    }

    pub(crate) fn delete(&self, key: &str) {
        let mut keys = self.keys.write();
        if let Ok(i) = keys.binary_search_by(|k| k.as_str().cmp(key)) {
            keys.remove(i);
            self.vars.remove(key);
        }
    }

    /// Visit entries in ascending key order under a shared lock on the index.
    ///
    /// The key set is fixed for the walk; values may change underneath it. A
    /// key whose value is not (yet or any longer) loadable is skipped. `f`
    /// must not add or delete keys of this same table.
    pub(crate) fn do_each<F: FnMut(KeyValue)>(&self, mut f: F) {
        let keys = self.keys.read();
        for k in keys.iter() {
            let Some(value) = self.get(k) else { continue };
            f(KeyValue {
                key: k.clone(),
                value,
            });
        }
    }

    pub(crate) fn clear(&self) {
        let mut keys = self.keys.write();
        keys.clear();
        self.vars.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.read().len()
    }
}
