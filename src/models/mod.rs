// src/models/mod.rs

//! Domain models for the prayer-time service.

mod record;
mod selectors;

// Re-export all public types
pub use record::{DailyPrayerRecord, Field, HIJRI_SENTINEL, PrayerSlot, TIME_SENTINEL};
pub use selectors::{HijriSelectors, TimesSelectors};
