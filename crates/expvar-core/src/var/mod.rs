//! The `Var` contract and the variable kinds that satisfy it.
//!
//! A `Var` is a capability, not a struct: anything that can produce valid JSON
//! for its current value on demand. Registries store `Arc<dyn Var>` and recover
//! the concrete kind with [`downcast_arc`] when a typed handle is needed.

mod func;
mod scalar;

use std::any::Any;
use std::sync::Arc;

use crate::error::Result;

pub use func::Func;
pub use scalar::{Float, Int, Str};

/// Type-erasure helper implemented for every `'static` type.
///
/// Callers holding an `Arc<dyn Var>` must dispatch through the trait object
/// (`(*var).as_any()`), otherwise the blanket impl for `Arc` itself is chosen.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// An exported variable.
pub trait Var: AsAny {
    /// Valid JSON text for the current value.
    ///
    /// Types whose natural text form is not JSON must not implement `Var`
    /// by forwarding to it; return an error instead.
    fn to_json(&self) -> Result<String>;
}

impl dyn Var {
    /// Borrow the concrete kind behind a trait object.
    pub fn downcast_ref<T: Var>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Var>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Recover a typed handle from a stored variable. Returns `None` on a kind
/// mismatch.
pub fn downcast_arc<T: Var>(var: Arc<dyn Var>) -> Option<Arc<T>> {
    var.into_any().downcast::<T>().ok()
}

/// Variable kinds that registries can create on demand.
pub trait Kind: Var + Default {
    /// Human-readable kind name used in mismatch errors.
    const NAME: &'static str;
}

/// One entry observed during iteration. Produced transiently, never stored.
#[derive(Clone)]
pub struct KeyValue {
    pub key: String,
    pub value: Arc<dyn Var>,
}

impl std::fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValue").field("key", &self.key).finish_non_exhaustive()
    }
}
