// src/resolver.rs

//! Current prayer-slot resolution.
//!
//! Pure and deterministic: given today's record and a time of day, find
//! the last slot whose time has passed. Before Fajr the wraparound rule
//! applies and yesterday's Isha is still in effect.

use chrono::NaiveTime;

use crate::models::{DailyPrayerRecord, PrayerSlot};
use crate::utils::parse_time_of_day;

/// Candidate instants for the six slots, in canonical order.
///
/// Missing, sentinel, or unparseable time text yields no candidate for
/// that slot.
pub fn slot_candidates(record: &DailyPrayerRecord) -> [Option<NaiveTime>; 6] {
    PrayerSlot::ALL.map(|slot| record.time(slot).and_then(parse_time_of_day))
}

/// Resolve the slot that is current at `now`.
///
/// Scans the canonical order backward; the first candidate at-or-before
/// `now` wins, so a prayer becomes current at the exact minute it starts.
/// Slots without a candidate are skipped. If nothing has passed yet, the
/// answer is Isha.
pub fn current_slot(record: &DailyPrayerRecord, now: NaiveTime) -> PrayerSlot {
    let candidates = slot_candidates(record);

    for slot in PrayerSlot::ALL.iter().rev() {
        if let Some(time) = candidates[slot.index()] {
            if time <= now {
                return *slot;
            }
        }
    }

    PrayerSlot::Isha
}
