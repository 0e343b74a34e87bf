use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Serialize, Serializer};

use crate::error::{ExpvarError, Result};

use super::{Kind, Var};

/// 64-bit signed integer variable.
#[derive(Debug, Default)]
pub struct Int {
    i: AtomicI64,
}

impl Int {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.i.load(Ordering::Relaxed)
    }

    pub fn add(&self, delta: i64) {
        self.i.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn increment(&self) {
        self.add(1);
    }

    pub fn decrement(&self) {
        self.add(-1);
    }

    pub fn set(&self, value: i64) {
        self.i.store(value, Ordering::Relaxed);
    }
}

impl Var for Int {
    fn to_json(&self) -> Result<String> {
        Ok(self.value().to_string())
    }
}

impl Kind for Int {
    const NAME: &'static str = "int";
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_i64(self.value())
    }
}

/// 64-bit float variable.
///
/// Stored as its bit pattern so that `add` can run as a compare-and-swap loop;
/// there is no hardware atomic float add.
#[derive(Debug, Default)]
pub struct Float {
    bits: AtomicU64,
}

impl Float {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Accumulate `delta`. Concurrent adds land in some serial order, not
    /// necessarily call order.
    pub fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => cur = actual,
            }
        }
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Var for Float {
    /// Shortest decimal that round-trips. NaN and infinities have no JSON form.
    fn to_json(&self) -> Result<String> {
        let v = self.value();
        if !v.is_finite() {
            return Err(ExpvarError::NonFiniteFloat(v));
        }
        let mut text = serde_json::to_string(&v)?;
        // Integral values print as `2000`, not `2000.0`.
        if text.ends_with(".0") {
            text.truncate(text.len() - 2);
        }
        Ok(text)
    }
}

impl Kind for Float {
    const NAME: &'static str = "float";
}

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.value();
        if !v.is_finite() {
            return Err(serde::ser::Error::custom(ExpvarError::NonFiniteFloat(v)));
        }
        s.serialize_f64(v)
    }
}

/// String variable. The value is replaced wholesale, never edited in place.
pub struct Str {
    s: ArcSwap<String>,
}

impl Default for Str {
    fn default() -> Self {
        Self {
            s: ArcSwap::from_pointee(String::new()),
        }
    }
}

impl Str {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw, unquoted value.
    pub fn value(&self) -> Arc<String> {
        self.s.load_full()
    }

    pub fn set(&self, value: impl Into<String>) {
        self.s.store(Arc::new(value.into()));
    }
}

impl std::fmt::Debug for Str {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Str").field(&*self.s.load()).finish()
    }
}

impl Var for Str {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.s.load().as_str())?)
    }
}

impl Kind for Str {
    const NAME: &'static str = "string";
}

impl Serialize for Str {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.s.load().as_str())
    }
}
