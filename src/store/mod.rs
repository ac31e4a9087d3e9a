// src/store/mod.rs

//! Durable cache for prayer data.
//!
//! The key space is flat: `<field>_<dd-MM-yyyy>` strings mapping to string
//! values. Entries are append/overwrite-only with no expiry; stale data is
//! served when a fetch fails. The sync service is the only writer and runs
//! at most one cycle at a time, so the store needs no locking discipline of
//! its own.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{DailyPrayerRecord, Field, PrayerSlot};

// Re-export for convenience
pub use local::LocalStore;

/// Metadata about a batch apply.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of fields written or overwritten by this batch
    pub fields_written: usize,
    /// Total entries in the cache after the apply
    pub total_entries: usize,
    /// Timestamp of the commit
    pub timestamp: DateTime<Utc>,
}

/// Trait for prayer-data cache backends.
#[async_trait]
pub trait PrayerStore: Send + Sync {
    /// Merge a batch of partial records into the cache in one atomic
    /// commit.
    ///
    /// The merge is per-field: a batch carrying only time fields for a
    /// date must not disturb a previously stored Hijri field for that
    /// date, and vice versa.
    async fn apply(&self, batch: &[DailyPrayerRecord]) -> Result<WriteSummary>;

    /// Point lookup. Never fails: an absent key (or an unreadable cache,
    /// which is logged) yields the field's sentinel.
    async fn get(&self, date: &str, field: Field) -> String;

    /// Assemble a full record for a date, mapping sentinels back to
    /// unpopulated fields.
    async fn load_record(&self, date: &str) -> DailyPrayerRecord {
        let mut record = DailyPrayerRecord::new(date);
        for slot in PrayerSlot::ALL {
            let field = Field::Slot(slot);
            let value = self.get(date, field).await;
            if value != field.sentinel() {
                record.times[slot.index()] = Some(value);
            }
        }
        let hijri = self.get(date, Field::HijriDate).await;
        if hijri != Field::HijriDate.sentinel() {
            record.hijri_date = Some(hijri);
        }
        record
    }
}
