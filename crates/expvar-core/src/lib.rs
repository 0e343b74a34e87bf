//! expvar core: the exported-variable registry, its variable kinds, and the
//! JSON rendering of a registry snapshot.
//!
//! Any part of a process can publish named, live variables into a [`Bucket`]
//! and mutate them from arbitrary threads. A reader walks the bucket in sorted
//! key order and asks each [`Var`] to serialize itself, producing one JSON
//! document. This crate carries no transport or runtime dependencies; the
//! HTTP surface lives in `expvar-server`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. The only panics are
//! the fatal registration paths ([`Bucket::publish`] on a duplicate name and
//! the typed constructors on a kind mismatch), each scoped with an explicit
//! allow and preceded by an `error!` log. Every other fallible path surfaces
//! as [`ExpvarError`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod bucket;
pub mod error;
mod index;
pub mod map;
pub mod render;
pub mod var;

pub use bucket::{
    default_bucket, do_each, get, new_float, new_int, new_map, new_string, publish, Bucket,
};
/// Shared result type.
pub use error::{ErrorKind, ExpvarError, Result};
pub use map::Map;
pub use render::{render, render_default, write_json};
pub use var::{Float, Func, Int, KeyValue, Str, Var};
