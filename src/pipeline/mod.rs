// src/pipeline/mod.rs

//! Pipeline entry points.
//!
//! - `SyncService::run_sync_cycle`: fetch, parse, and commit both data kinds
//! - `run_show` / `run_current`: render cached data for the console

pub mod show;
pub mod sync;

pub use show::{run_current, run_show};
pub use sync::{LogRefresh, RefreshSignal, SyncOutcome, SyncService};
