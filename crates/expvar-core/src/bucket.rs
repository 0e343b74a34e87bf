//! Root registry of exported variables.
//!
//! A [`Bucket`] is the source of truth for what is published. Registration is
//! a startup-time activity: publishing the same name twice, or asking a typed
//! constructor for a name bound to another kind, is a programming defect and
//! aborts loudly. The `try_*` variants return the error instead, for callers
//! that wire registries dynamically.

use std::sync::{Arc, OnceLock};

use crate::error::{ExpvarError, Result};
use crate::index::SortedTable;
use crate::map::Map;
use crate::var::{downcast_arc, Float, Int, Kind, KeyValue, Str, Var};

#[derive(Default)]
pub struct Bucket {
    vars: SortedTable,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `v` under `name`, or fail if the name is taken.
    pub fn try_publish(&self, name: &str, v: Arc<dyn Var>) -> Result<()> {
        let (_, created) = self.vars.get_or_insert_with(name, || v);
        if !created {
            return Err(ExpvarError::DuplicateName(name.to_owned()));
        }
        tracing::debug!(%name, "published expvar");
        Ok(())
    }

    /// Register `v` under `name`.
    ///
    /// # Panics
    /// If `name` is already registered.
    pub fn publish(&self, name: &str, v: Arc<dyn Var>) {
        if let Err(e) = self.try_publish(name, v) {
            fatal(e);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Var>> {
        self.vars.get(name)
    }

    /// Return the `T` published under `name`, creating and publishing a fresh
    /// one if the name is free.
    pub fn try_get_or_new<T: Kind>(&self, name: &str) -> Result<Arc<T>> {
        let (v, created) = self
            .vars
            .get_or_insert_with(name, || Arc::new(T::default()) as Arc<dyn Var>);
        if created {
            tracing::debug!(%name, kind = T::NAME, "published expvar");
        }
        downcast_arc::<T>(v).ok_or_else(|| ExpvarError::KindMismatch {
            name: name.to_owned(),
            expected: T::NAME,
        })
    }

    fn get_or_new<T: Kind>(&self, name: &str) -> Arc<T> {
        match self.try_get_or_new::<T>(name) {
            Ok(v) => v,
            Err(e) => fatal(e),
        }
    }

    /// # Panics
    /// If `name` is bound to a variable that is not an [`Int`].
    pub fn new_int(&self, name: &str) -> Arc<Int> {
        self.get_or_new(name)
    }

    /// # Panics
    /// If `name` is bound to a variable that is not a [`Float`].
    pub fn new_float(&self, name: &str) -> Arc<Float> {
        self.get_or_new(name)
    }

    /// # Panics
    /// If `name` is bound to a variable that is not a [`Str`].
    pub fn new_string(&self, name: &str) -> Arc<Str> {
        self.get_or_new(name)
    }

    /// # Panics
    /// If `name` is bound to a variable that is not a [`Map`].
    pub fn new_map(&self, name: &str) -> Arc<Map> {
        self.get_or_new(name)
    }

    /// Call `f` for each published variable in ascending name order.
    ///
    /// The name set is locked for the duration of the walk, but existing
    /// variables may be updated concurrently. `f` must not publish into this
    /// bucket.
    pub fn do_each<F: FnMut(KeyValue)>(&self, f: F) {
        self.vars.do_each(f);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket").field("len", &self.len()).finish()
    }
}

#[allow(clippy::panic)]
fn fatal(e: ExpvarError) -> ! {
    tracing::error!(error = %e, "fatal expvar registration error");
    panic!("{e}");
}

static DEFAULT: OnceLock<Arc<Bucket>> = OnceLock::new();

/// The process-wide bucket. Created on first use and never torn down.
pub fn default_bucket() -> &'static Arc<Bucket> {
    DEFAULT.get_or_init(|| Arc::new(Bucket::new()))
}

/// [`Bucket::publish`] on the default bucket.
pub fn publish(name: &str, v: Arc<dyn Var>) {
    default_bucket().publish(name, v);
}

/// [`Bucket::get`] on the default bucket.
pub fn get(name: &str) -> Option<Arc<dyn Var>> {
    default_bucket().get(name)
}

pub fn new_int(name: &str) -> Arc<Int> {
    default_bucket().new_int(name)
}

pub fn new_float(name: &str) -> Arc<Float> {
    default_bucket().new_float(name)
}

pub fn new_string(name: &str) -> Arc<Str> {
    default_bucket().new_string(name)
}

pub fn new_map(name: &str) -> Arc<Map> {
    default_bucket().new_map(name)
}

/// [`Bucket::do_each`] on the default bucket.
pub fn do_each<F: FnMut(KeyValue)>(f: F) {
    default_bucket().do_each(f);
}
