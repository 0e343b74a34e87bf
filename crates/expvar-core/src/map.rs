//! String-to-`Var` map that is itself a publishable variable.

use std::fmt::Write;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::index::SortedTable;
use crate::var::{Float, Int, Kind, KeyValue, Var};

/// Concurrent map with deterministic (sorted) iteration order.
#[derive(Default)]
pub struct Map {
    table: SortedTable,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries. The map keeps its identity.
    pub fn init(&self) -> &Self {
        self.table.clear();
        tracing::trace!("expvar map cleared");
        self
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Var>> {
        self.table.get(key)
    }

    /// Insert or replace `key`.
    pub fn set(&self, key: &str, v: Arc<dyn Var>) {
        self.table.set(key, v);
    }

    /// Add `delta` to the [`Int`] under `key`, creating it at zero if absent.
    /// If `key` holds another kind of variable this is a no-op.
    pub fn add(&self, key: &str, delta: i64) {
        let (v, _) = self.table.get_or_insert_with(key, || Arc::new(Int::new()));
        if let Some(i) = v.downcast_ref::<Int>() {
            i.add(delta);
        }
    }

    /// Add `delta` to the [`Float`] under `key`, creating it at zero if absent.
    /// If `key` holds another kind of variable this is a no-op.
    pub fn add_float(&self, key: &str, delta: f64) {
        let (v, _) = self.table.get_or_insert_with(key, || Arc::new(Float::new()));
        if let Some(f) = v.downcast_ref::<Float>() {
            f.add(delta);
        }
    }

    /// Remove `key`. Absent keys are ignored.
    pub fn delete(&self, key: &str) {
        self.table.delete(key);
    }

    /// Call `f` for each entry in ascending key order.
    ///
    /// The key set is locked for the duration of the walk, but existing
    /// entries may be updated concurrently. `f` must not insert or delete
    /// keys of this map.
    pub fn do_each<F: FnMut(KeyValue)>(&self, f: F) {
        self.table.do_each(f);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Var for Map {
    /// `{"k1": v1, "k2": v2}` in key order. Entries that fail to serialize are
    /// left out.
    fn to_json(&self) -> Result<String> {
        let mut out = String::from("{");
        let mut first = true;
        self.do_each(|kv| {
            let val = match kv.value.to_json() {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(key = %kv.key, error = %e, "omitting map entry");
                    return;
                }
            };
            if !first {
                out.push_str(", ");
            }
            first = false;
            let _ = write!(out, "{}: {}", quote(&kv.key), val);
        });
        out.push('}');
        Ok(out)
    }
}

impl Kind for Map {
    const NAME: &'static str = "map";
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map").field("len", &self.len()).finish()
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<(String, serde_json::Value)> = Vec::with_capacity(self.len());
        self.do_each(|kv| {
            let parsed = kv
                .value
                .to_json()
                .ok()
                .and_then(|text| serde_json::from_str(&text).ok());
            if let Some(v) = parsed {
                entries.push((kv.key, v));
            }
        });
        let mut m = s.serialize_map(Some(entries.len()))?;
        for (k, v) in &entries {
            m.serialize_entry(k, v)?;
        }
        m.end()
    }
}

/// JSON-quote a key. String serialization cannot fail.
pub(crate) fn quote(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key.escape_default()))
}
