//! Read-only environment accessors published as lazy variables.
//!
//! - `cmdline`  : process arguments
//! - `memstats` : process and system memory snapshot
//!
//! Both are registered through [`Func`], so every render recomputes them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use serde::Serialize;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use expvar_core::error::Result;
use expvar_core::{Bucket, Func};

use crate::config::PublishSection;

pub const CMDLINE: &str = "cmdline";
pub const MEMSTATS: &str = "memstats";

/// Process arguments, program name first.
pub fn cmdline() -> Vec<String> {
    std::env::args().collect()
}

/// Memory snapshot. All sizes in bytes.
#[derive(Debug, Clone, Serialize)]
pub struct MemStats {
    pub rss_bytes: u64,
    pub virtual_bytes: u64,
    pub total_memory_bytes: u64,
    pub used_memory_bytes: u64,
    pub available_memory_bytes: u64,
    pub uptime_secs: u64,
    /// Snapshots taken so far, this one included.
    pub refreshes: u64,
}

struct MemStatsSource {
    sys: Mutex<System>,
    pid: Option<Pid>,
    refreshes: AtomicU64,
}

impl MemStatsSource {
    fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "current pid unavailable; process memstats will be zero");
                None
            }
        };
        Self {
            sys: Mutex::new(System::new()),
            pid,
            refreshes: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> MemStats {
        let refreshes = self.refreshes.fetch_add(1, Ordering::Relaxed) + 1;
        let mut sys = self.sys.lock();
        sys.refresh_memory();

        let mut stats = MemStats {
            rss_bytes: 0,
            virtual_bytes: 0,
            total_memory_bytes: sys.total_memory(),
            used_memory_bytes: sys.used_memory(),
            available_memory_bytes: sys.available_memory(),
            uptime_secs: 0,
            refreshes,
        };

        if let Some(pid) = self.pid {
            sys.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid]),
                true,
                ProcessRefreshKind::nothing().with_memory(),
            );
            if let Some(p) = sys.process(pid) {
                stats.rss_bytes = p.memory();
                stats.virtual_bytes = p.virtual_memory();
                stats.uptime_secs = p.run_time();
            }
        }
        stats
    }
}

static MEMSTATS_SOURCE: OnceLock<MemStatsSource> = OnceLock::new();

/// Fresh memory snapshot for this process.
pub fn memstats() -> MemStats {
    MEMSTATS_SOURCE.get_or_init(MemStatsSource::new).snapshot()
}

/// Publish the enabled accessors into `bucket`.
pub fn register(bucket: &Bucket, publish: &PublishSection) -> Result<()> {
    if publish.cmdline {
        bucket.try_publish(CMDLINE, Arc::new(Func::new(cmdline)))?;
    }
    if publish.memstats {
        bucket.try_publish(MEMSTATS, Arc::new(Func::new(memstats)))?;
    }
    Ok(())
}
