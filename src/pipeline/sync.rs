// src/pipeline/sync.rs

//! One fetch cycle: pull both remote documents, parse, commit, report.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::models::DailyPrayerRecord;
use crate::services::{HijriCalendarParser, PrayerTimesParser};
use crate::store::PrayerStore;
use crate::utils::http::PageFetcher;

/// Outcome of one sync cycle.
///
/// There is no fatal error class here: every failure mode degrades to
/// "this cycle contributed nothing new for this data kind" while cached
/// values stay intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    pub times_ok: bool,
    pub hijri_ok: bool,
}

impl SyncOutcome {
    /// Both sub-fetches succeeded.
    pub fn is_success(self) -> bool {
        self.times_ok && self.hijri_ok
    }
}

/// Downstream display-refresh seam.
///
/// In the host application this is the widget-update broadcast; it fires
/// only on a fully successful cycle.
pub trait RefreshSignal: Send + Sync {
    fn request_refresh(&self);
}

/// Signal that only logs the request; used by the CLI.
pub struct LogRefresh;

impl RefreshSignal for LogRefresh {
    fn request_refresh(&self) {
        log::info!("Display refresh requested");
    }
}

/// Orchestrates one fetch cycle against the two remote sources.
pub struct SyncService {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn PrayerStore>,
    refresh: Arc<dyn RefreshSignal>,
}

impl SyncService {
    pub fn new(
        config: Arc<Config>,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn PrayerStore>,
        refresh: Arc<dyn RefreshSignal>,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            refresh,
        }
    }

    /// Run one sync cycle.
    ///
    /// The two sub-fetches run sequentially and independently; either may
    /// soft-fail without aborting the cycle. All parsed rows are buffered
    /// and committed in a single batch at the end, so a reader never
    /// observes a half-applied cycle. The refresh signal fires only when
    /// both sub-fetches succeed; a partial success still persists whatever
    /// was parsed but reports overall failure so the external scheduler
    /// can retry.
    pub async fn run_sync_cycle(&self) -> SyncOutcome {
        let mut batch: Vec<DailyPrayerRecord> = Vec::new();

        let times_ok = match self.fetch_times().await {
            Ok(rows) if rows.is_empty() => {
                log::warn!("Prayer-time fetch produced no valid rows");
                false
            }
            Ok(rows) => {
                log::info!("Fetched prayer times for {} days", rows.len());
                batch.extend(rows);
                true
            }
            Err(e) => {
                log::warn!("Prayer-time fetch failed: {}", e);
                false
            }
        };

        let hijri_ok = match self.fetch_hijri().await {
            Ok(rows) if rows.is_empty() => {
                log::warn!("Hijri calendar fetch produced no valid rows");
                false
            }
            Ok(rows) => {
                log::info!("Fetched Hijri dates for {} days", rows.len());
                batch.extend(rows);
                true
            }
            Err(e) => {
                log::warn!("Hijri calendar fetch failed: {}", e);
                false
            }
        };

        if !batch.is_empty() {
            if let Err(e) = self.store.apply(&batch).await {
                // Nothing new became observable, so the cycle reports
                // total failure regardless of the fetch results.
                log::error!("Batch commit failed: {}", e);
                return SyncOutcome::default();
            }
        }

        let outcome = SyncOutcome { times_ok, hijri_ok };
        if outcome.is_success() {
            self.refresh.request_refresh();
        } else {
            log::warn!(
                "Sync cycle incomplete: times_ok={}, hijri_ok={}",
                outcome.times_ok,
                outcome.hijri_ok
            );
        }
        outcome
    }

    async fn fetch_times(&self) -> Result<Vec<DailyPrayerRecord>> {
        let sources = &self.config.sources;
        log::debug!("Fetching prayer times from {}", sources.times_url);
        let html = self.fetcher.fetch(&sources.times_url).await?;
        PrayerTimesParser::new(sources.times_selectors.clone()).parse(&html)
    }

    async fn fetch_hijri(&self) -> Result<Vec<DailyPrayerRecord>> {
        let sources = &self.config.sources;
        log::debug!("Fetching Hijri calendar from {}", sources.hijri_url);
        let html = self.fetcher.fetch(&sources.hijri_url).await?;
        HijriCalendarParser::new(sources.hijri_selectors.clone()).parse(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::error::AppError;
    use crate::models::{Field, PrayerSlot};
    use crate::store::LocalStore;

    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::fetch(url, "connection refused"))
        }
    }

    #[derive(Default)]
    struct CountingRefresh {
        count: AtomicUsize,
    }

    impl RefreshSignal for CountingRefresh {
        fn request_refresh(&self) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn times_page() -> String {
        "<html><body><table id=\"waktu-semua\"><tbody>\
         <tr><td><h6>14-05-2025</h6></td><td>Wed</td>\
         <td>05:50</td><td>07:10</td><td>13:15</td>\
         <td>16:30</td><td>19:20</td><td>20:35</td></tr>\
         </tbody></table></body></html>"
            .to_string()
    }

    fn hijri_page() -> String {
        "<html><body><table class=\"hijri-calendar\"><tbody>\
         <tr><td>Wednesday, May 14, 2025</td>\
         <td><strong>16 Dhul Qadah 1446 Hijri</strong></td></tr>\
         </tbody></table></body></html>"
            .to_string()
    }

    struct Harness {
        service: SyncService,
        store: Arc<LocalStore>,
        refresh: Arc<CountingRefresh>,
        _tmp: TempDir,
    }

    fn harness(pages: HashMap<String, String>) -> Harness {
        let tmp = TempDir::new().unwrap();
        let config = Arc::new(Config::default());
        let store = Arc::new(LocalStore::new(tmp.path()));
        let refresh = Arc::new(CountingRefresh::default());
        let service = SyncService::new(
            Arc::clone(&config),
            Arc::new(StubFetcher { pages }),
            store.clone(),
            refresh.clone(),
        );
        Harness {
            service,
            store,
            refresh,
            _tmp: tmp,
        }
    }

    fn both_pages() -> HashMap<String, String> {
        let config = Config::default();
        HashMap::from([
            (config.sources.times_url.clone(), times_page()),
            (config.sources.hijri_url.clone(), hijri_page()),
        ])
    }

    #[tokio::test]
    async fn test_full_success_commits_and_signals() {
        let h = harness(both_pages());

        let outcome = h.service.run_sync_cycle().await;
        assert!(outcome.is_success());
        assert_eq!(h.refresh.count.load(Ordering::SeqCst), 1);

        let fajr = h
            .store
            .get("14-05-2025", Field::Slot(PrayerSlot::Fajr))
            .await;
        assert_eq!(fajr, "05:50");
        let hijri = h.store.get("14-05-2025", Field::HijriDate).await;
        assert_eq!(hijri, "16 Dhul Qadah 1446");
    }

    #[tokio::test]
    async fn test_hijri_failure_still_commits_times() {
        let config = Config::default();
        let pages = HashMap::from([(config.sources.times_url.clone(), times_page())]);
        let h = harness(pages);

        let outcome = h.service.run_sync_cycle().await;
        assert!(outcome.times_ok);
        assert!(!outcome.hijri_ok);
        assert!(!outcome.is_success());

        // Times were batch-applied despite the failed sub-fetch,
        // and no refresh fired.
        let isha = h
            .store
            .get("14-05-2025", Field::Slot(PrayerSlot::Isha))
            .await;
        assert_eq!(isha, "20:35");
        assert_eq!(h.refresh.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_table_is_a_soft_failure() {
        let config = Config::default();
        let pages = HashMap::from([
            (
                config.sources.times_url.clone(),
                "<html><body><p>down for maintenance</p></body></html>".to_string(),
            ),
            (config.sources.hijri_url.clone(), hijri_page()),
        ]);
        let h = harness(pages);

        let outcome = h.service.run_sync_cycle().await;
        assert!(!outcome.times_ok);
        assert!(outcome.hijri_ok);
        assert_eq!(h.refresh.count.load(Ordering::SeqCst), 0);

        // The failed kind serves sentinels, the good kind is cached
        let fajr = h
            .store
            .get("14-05-2025", Field::Slot(PrayerSlot::Fajr))
            .await;
        assert_eq!(fajr, "--:--");
        let hijri = h.store.get("14-05-2025", Field::HijriDate).await;
        assert_eq!(hijri, "16 Dhul Qadah 1446");
    }

    #[tokio::test]
    async fn test_repeat_cycles_are_idempotent() {
        let h = harness(both_pages());

        h.service.run_sync_cycle().await;
        let first = h.store.load_record("14-05-2025").await;
        h.service.run_sync_cycle().await;
        let second = h.store.load_record("14-05-2025").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_total_failure_preserves_previous_cache() {
        let h = harness(both_pages());
        h.service.run_sync_cycle().await;

        // Second service against the same store, with the network gone
        let config = Arc::new(Config::default());
        let offline = SyncService::new(
            config,
            Arc::new(StubFetcher {
                pages: HashMap::new(),
            }),
            h.store.clone(),
            Arc::new(CountingRefresh::default()),
        );

        let outcome = offline.run_sync_cycle().await;
        assert!(!outcome.times_ok);
        assert!(!outcome.hijri_ok);

        // Stale-but-usable data survives
        let maghrib = h
            .store
            .get("14-05-2025", Field::Slot(PrayerSlot::Maghrib))
            .await;
        assert_eq!(maghrib, "19:20");
    }
}
