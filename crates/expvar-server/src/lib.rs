//! expvar server library entry.
//!
//! Wires the core registry to HTTP: strict YAML config, application state
//! owning the bucket, the environment accessors published at startup, and the
//! axum router serving the JSON snapshot. Consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod env;
pub mod ops;
pub mod router;
