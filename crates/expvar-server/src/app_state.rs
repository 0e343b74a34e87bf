//! Shared application state for the expvar server.
//!
//! Startup wiring happens here: the environment accessors and the server's
//! own `server` map are published into the bucket before the router is built.
//! Registration errors come back as `Result` so `main` decides how to fail.

use std::sync::Arc;

use expvar_core::error::Result;
use expvar_core::{default_bucket, Bucket, Map};

use crate::config::ServerConfig;
use crate::env;

/// Name of the map holding the server's own counters.
pub const SERVER_MAP: &str = "server";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    bucket: Arc<Bucket>,
    server: Arc<Map>,
}

impl AppState {
    /// Build state over the process-wide bucket.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_bucket(cfg, Arc::clone(default_bucket()))
    }

    /// Build state over an explicit bucket (isolated registries in tests).
    pub fn with_bucket(cfg: ServerConfig, bucket: Arc<Bucket>) -> Result<Self> {
        env::register(&bucket, &cfg.publish)?;
        let server = bucket.try_get_or_new::<Map>(SERVER_MAP)?;
        server.add("requests", 0);

        tracing::info!(vars = bucket.len(), "expvar registry wired");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                bucket,
                server,
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn bucket(&self) -> &Arc<Bucket> {
        &self.inner.bucket
    }

    /// Count one snapshot request.
    pub fn record_request(&self) {
        self.inner.server.add("requests", 1);
    }
}
