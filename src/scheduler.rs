// src/scheduler.rs

//! Single-flight scheduling for sync cycles.
//!
//! At most one cycle is in flight at a time. Callers pick an enqueue
//! policy: `Replace` supersedes stale in-flight work (user-triggered
//! refresh), `Keep` lets it finish (periodic cadence). Aborting a cycle is
//! safe because the store commits in one batch at the end, so a superseded
//! cycle leaves the last committed state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::{AppError, Result};
use crate::pipeline::{SyncOutcome, SyncService};

/// What to do when a cycle is already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueuePolicy {
    /// Abort the in-flight cycle and start fresh
    Replace,
    /// Let the in-flight cycle finish; skip this request
    Keep,
}

/// Runs sync cycles with a single-flight guarantee.
pub struct SyncScheduler {
    service: Arc<SyncService>,
    in_flight: Mutex<Option<JoinHandle<SyncOutcome>>>,
}

impl SyncScheduler {
    pub fn new(service: Arc<SyncService>) -> Self {
        Self {
            service,
            in_flight: Mutex::new(None),
        }
    }

    /// Request a sync cycle. Returns true if a new cycle was started.
    pub async fn enqueue(&self, policy: EnqueuePolicy) -> bool {
        let mut guard = self.in_flight.lock().await;

        if let Some(handle) = guard.as_ref() {
            if !handle.is_finished() {
                match policy {
                    EnqueuePolicy::Keep => {
                        log::debug!("Sync cycle already in flight, keeping it");
                        return false;
                    }
                    EnqueuePolicy::Replace => {
                        log::info!("Superseding in-flight sync cycle");
                        handle.abort();
                    }
                }
            }
        }

        let service = Arc::clone(&self.service);
        *guard = Some(tokio::spawn(
            async move { service.run_sync_cycle().await },
        ));
        true
    }

    /// Wait for the in-flight cycle, if any, and return its outcome.
    ///
    /// A superseded cycle yields None.
    pub async fn wait_idle(&self) -> Option<SyncOutcome> {
        let handle = self.in_flight.lock().await.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                if e.is_cancelled() {
                    log::debug!("Sync cycle was superseded before finishing");
                } else {
                    log::error!("Sync cycle task failed: {}", e);
                }
                None
            }
        }
    }

    /// Tick forever at the given period with the Keep policy.
    ///
    /// The first cycle starts immediately.
    pub async fn run_periodic(&self, period: Duration) {
        log::info!("Periodic sync every {:?}", period);
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.enqueue(EnqueuePolicy::Keep).await;
        }
    }
}

/// Parse a cadence string like "30m", "6h", "1d", or raw seconds.
pub fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    let secs = if let Some(hours) = s.strip_suffix('h') {
        hours.parse::<u64>().ok().map(|h| h * 3600)
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes.parse::<u64>().ok().map(|m| m * 60)
    } else if let Some(days) = s.strip_suffix('d') {
        days.parse::<u64>().ok().map(|d| d * 86400)
    } else if let Some(raw) = s.strip_suffix('s') {
        raw.parse::<u64>().ok()
    } else {
        s.parse::<u64>().ok()
    };

    match secs {
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::config(format!(
            "Invalid interval '{}'. Use forms like '30m', '6h', '1d'",
            s
        ))),
    }
}
