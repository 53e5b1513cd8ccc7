//! Memory telemetry
//!
//! Samples system memory for the health endpoint and, when enabled, logs a
//! sample on a fixed interval while the server runs.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::System;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fraction of memory in use above which samples are logged as warnings
const HIGH_USAGE_THRESHOLD: f64 = 0.9;

/// One memory reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySample {
    pub total_mb: u64,
    pub used_mb: u64,
    pub usage_percent: f64,
}

impl MemorySample {
    fn from_bytes(total: u64, used: u64) -> Self {
        let usage_percent = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };
        Self {
            total_mb: total / 1024 / 1024,
            used_mb: used / 1024 / 1024,
            usage_percent,
        }
    }

    pub fn is_high(&self) -> bool {
        self.usage_percent >= HIGH_USAGE_THRESHOLD * 100.0
    }
}

/// Shared system monitor
#[derive(Debug, Clone)]
pub struct MemoryMonitor {
    system: Arc<Mutex<System>>,
}

impl MemoryMonitor {
    pub fn new() -> Self {
        Self {
            system: Arc::new(Mutex::new(System::new())),
        }
    }

    pub async fn sample(&self) -> MemorySample {
        let mut system = self.system.lock().await;
        system.refresh_memory();
        MemorySample::from_bytes(system.total_memory(), system.used_memory())
    }

    /// Log a sample every `interval_secs`; returns `None` when disabled
    pub fn spawn_reporter(&self, interval_secs: u64) -> Option<JoinHandle<()>> {
        if interval_secs == 0 {
            return None;
        }

        let monitor = self.clone();
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let sample = monitor.sample().await;
                if sample.is_high() {
                    warn!(
                        "Memory usage high: {} / {} MB ({:.1}%)",
                        sample.used_mb, sample.total_mb, sample.usage_percent
                    );
                } else {
                    info!(
                        "Memory usage: {} / {} MB ({:.1}%)",
                        sample.used_mb, sample.total_mb, sample.usage_percent
                    );
                }
            }
        }))
    }
}

impl Default for MemoryMonitor {
    fn default() -> Self {
        Self::new()
    }
}
