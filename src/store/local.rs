// src/store/local.rs

//! Local filesystem cache backend.
//!
//! One JSON document holds the whole key space. A batch apply reads the
//! document, merges, and rewrites it through a temp-file rename, so a
//! reader never observes a half-applied cycle and an aborted cycle leaves
//! the last committed state intact.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{DailyPrayerRecord, Field};
use crate::store::{PrayerStore, WriteSummary};

const CACHE_FILE: &str = "cache.json";

/// On-disk cache document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheData {
    /// Timestamp of the last committed batch
    updated_at: Option<DateTime<Utc>>,
    /// Flat `<field>_<date>` -> value map
    entries: BTreeMap<String, String>,
}

/// File-backed prayer-data cache.
#[derive(Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn cache_path(&self) -> PathBuf {
        self.root_dir.join(CACHE_FILE)
    }

    /// Read the cache document, returning None if it doesn't exist yet.
    async fn read_cache(&self) -> Result<Option<CacheData>> {
        match tokio::fs::read(self.cache_path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write the cache document atomically (write to temp, then rename).
    async fn write_cache(&self, data: &CacheData) -> Result<()> {
        let path = self.cache_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl PrayerStore for LocalStore {
    async fn apply(&self, batch: &[DailyPrayerRecord]) -> Result<WriteSummary> {
        let mut data = self.read_cache().await?.unwrap_or_default();

        let mut fields_written = 0;
        for record in batch {
            for (field, value) in record.fields() {
                data.entries
                    .insert(field.storage_key(&record.date), value.to_string());
                fields_written += 1;
            }
        }

        let now = Utc::now();
        data.updated_at = Some(now);
        self.write_cache(&data).await?;

        log::info!(
            "Committed {} fields ({} entries total)",
            fields_written,
            data.entries.len()
        );

        Ok(WriteSummary {
            fields_written,
            total_entries: data.entries.len(),
            timestamp: now,
        })
    }

    async fn get(&self, date: &str, field: Field) -> String {
        let data = match self.read_cache().await {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                log::warn!("Cache read failed, serving sentinel: {}", e);
                return field.sentinel().to_string();
            }
        };

        data.entries
            .get(&field.storage_key(date))
            .cloned()
            .unwrap_or_else(|| field.sentinel().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerSlot;
    use tempfile::TempDir;

    fn times_record(date: &str) -> DailyPrayerRecord {
        DailyPrayerRecord::with_times(
            date,
            [
                "05:50".into(),
                "07:10".into(),
                "13:15".into(),
                "16:30".into(),
                "19:20".into(),
                "20:35".into(),
            ],
        )
    }

    #[tokio::test]
    async fn test_sentinel_for_unpopulated_keys() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let time = store.get("01-01-2030", Field::Slot(PrayerSlot::Fajr)).await;
        assert_eq!(time, "--:--");
        let hijri = store.get("01-01-2030", Field::HijriDate).await;
        assert_eq!(hijri, "...");
    }

    #[tokio::test]
    async fn test_apply_then_get() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let summary = store.apply(&[times_record("14-05-2025")]).await.unwrap();
        assert_eq!(summary.fields_written, 6);
        assert_eq!(summary.total_entries, 6);

        let asr = store.get("14-05-2025", Field::Slot(PrayerSlot::Asr)).await;
        assert_eq!(asr, "16:30");
    }

    #[tokio::test]
    async fn test_merge_is_non_destructive() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.apply(&[times_record("14-05-2025")]).await.unwrap();
        store
            .apply(&[DailyPrayerRecord::with_hijri(
                "14-05-2025",
                "16 Dhul Qadah 1446",
            )])
            .await
            .unwrap();

        // Hijri upsert must not erase the earlier times
        let fajr = store.get("14-05-2025", Field::Slot(PrayerSlot::Fajr)).await;
        assert_eq!(fajr, "05:50");
        let hijri = store.get("14-05-2025", Field::HijriDate).await;
        assert_eq!(hijri, "16 Dhul Qadah 1446");

        // And a later times upsert must not erase the Hijri field
        store.apply(&[times_record("14-05-2025")]).await.unwrap();
        let hijri = store.get("14-05-2025", Field::HijriDate).await;
        assert_eq!(hijri, "16 Dhul Qadah 1446");
    }

    #[tokio::test]
    async fn test_double_apply_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.apply(&[times_record("14-05-2025")]).await.unwrap();
        let summary = store.apply(&[times_record("14-05-2025")]).await.unwrap();

        assert_eq!(summary.total_entries, 6);
        let isha = store.get("14-05-2025", Field::Slot(PrayerSlot::Isha)).await;
        assert_eq!(isha, "20:35");
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = LocalStore::new(tmp.path());
            store.apply(&[times_record("14-05-2025")]).await.unwrap();
        }

        let reopened = LocalStore::new(tmp.path());
        let dhuhr = reopened
            .get("14-05-2025", Field::Slot(PrayerSlot::Dhuhr))
            .await;
        assert_eq!(dhuhr, "13:15");
    }

    #[tokio::test]
    async fn test_load_record_maps_sentinels_to_none() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let mut partial = DailyPrayerRecord::new("14-05-2025");
        partial.times[PrayerSlot::Fajr.index()] = Some("05:50".to_string());
        store.apply(&[partial]).await.unwrap();

        let record = store.load_record("14-05-2025").await;
        assert_eq!(record.time(PrayerSlot::Fajr), Some("05:50"));
        assert_eq!(record.time(PrayerSlot::Dhuhr), None);
        assert_eq!(record.hijri_date, None);
    }
}
