// src/main.rs

//! waktu: prayer-time fetcher and widget cache CLI.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use waktu::config::Config;
use waktu::error::{AppError, Result};
use waktu::pipeline::{LogRefresh, SyncService, run_current, run_show};
use waktu::scheduler::{SyncScheduler, parse_interval};
use waktu::store::LocalStore;
use waktu::utils::http::HttpFetcher;

#[derive(Parser, Debug)]
#[command(
    name = "waktu",
    version,
    about = "Fetches and caches daily prayer times and Hijri dates"
)]
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one sync cycle against both remote sources
    Sync,
    /// Show the cached prayer times for a day
    Show {
        /// Day to show in dd-MM-yyyy form (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the currently active prayer slot
    Current,
    /// Sync periodically until interrupted
    Watch {
        /// Cadence like "30m", "6h", "1d" (default: from config)
        #[arg(long)]
        every: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let store = Arc::new(LocalStore::new(&config.store.dir));

    match cli.command {
        Command::Sync => {
            let service = build_service(&config, store)?;
            let outcome = service.run_sync_cycle().await;
            if !outcome.is_success() {
                return Err(AppError::fetch(
                    "sync cycle",
                    format!(
                        "times_ok={}, hijri_ok={}",
                        outcome.times_ok, outcome.hijri_ok
                    ),
                ));
            }
        }
        Command::Show { date } => run_show(store.as_ref(), date).await,
        Command::Current => run_current(store.as_ref()).await,
        Command::Watch { every } => {
            let interval = every.as_deref().unwrap_or(&config.schedule.interval);
            let period = parse_interval(interval)?;
            let service = build_service(&config, store)?;
            let scheduler = SyncScheduler::new(Arc::new(service));
            // First tick fires immediately
            scheduler.run_periodic(period).await;
        }
    }

    Ok(())
}

fn build_service(config: &Config, store: Arc<LocalStore>) -> Result<SyncService> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    Ok(SyncService::new(
        Arc::new(config.clone()),
        Arc::new(fetcher),
        store,
        Arc::new(LogRefresh),
    ))
}
