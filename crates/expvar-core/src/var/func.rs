use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

use super::Var;

type Eval = dyn Fn() -> Result<Value> + Send + Sync;

/// A variable whose value is computed by calling a function at render time.
///
/// Nothing is cached: every `to_json` evaluates the function again.
pub struct Func {
    f: Box<Eval>,
}

impl Func {
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Serialize,
    {
        Self {
            f: Box::new(move || Ok(serde_json::to_value(f())?)),
        }
    }

    /// Evaluate the function now.
    pub fn value(&self) -> Result<Value> {
        (self.f)()
    }
}

impl Var for Func {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.value()?)?)
    }
}

impl std::fmt::Debug for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Func(..)")
    }
}
