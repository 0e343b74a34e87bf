//! Top-level facade crate for expvar.
//!
//! Re-exports the core registry and the server library so users can depend on
//! a single crate. Most callers only need the [`prelude`]:
//!
//! ```
//! use expvar::prelude::*;
//!
//! let jobs = new_int("facade_doc_jobs");
//! jobs.increment();
//! assert!(render_default().contains("\"facade_doc_jobs\": 1"));
//! ```

pub mod core {
    pub use expvar_core::*;
}

pub mod server {
    pub use expvar_server::*;
}

/// Registry handles, variable kinds, and the default-bucket shortcuts.
pub mod prelude {
    pub use expvar_core::{
        default_bucket, do_each, get, new_float, new_int, new_map, new_string, publish, render,
        render_default, Bucket, Float, Func, Int, KeyValue, Map, Str, Var,
    };
}
