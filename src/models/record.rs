// src/models/record.rs

//! Core domain model: prayer slots, cache fields, and per-day records.

use std::fmt;

/// Placeholder shown for a prayer time that has never been fetched.
pub const TIME_SENTINEL: &str = "--:--";

/// Placeholder shown for a Hijri date that has never been fetched.
pub const HIJRI_SENTINEL: &str = "...";

/// One of the six canonical daily prayer events.
///
/// The declaration order is the canonical daily sequence and must not
/// change: the current-slot resolver scans it backward and wraps from
/// Fajr to Isha across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerSlot {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerSlot {
    /// All slots in canonical order.
    pub const ALL: [PrayerSlot; 6] = [
        PrayerSlot::Fajr,
        PrayerSlot::Sunrise,
        PrayerSlot::Dhuhr,
        PrayerSlot::Asr,
        PrayerSlot::Maghrib,
        PrayerSlot::Isha,
    ];

    /// Lowercase key used in the cache key space.
    pub fn key(self) -> &'static str {
        match self {
            PrayerSlot::Fajr => "fajr",
            PrayerSlot::Sunrise => "sunrise",
            PrayerSlot::Dhuhr => "dhuhr",
            PrayerSlot::Asr => "asr",
            PrayerSlot::Maghrib => "maghrib",
            PrayerSlot::Isha => "isha",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            PrayerSlot::Fajr => "Fajr",
            PrayerSlot::Sunrise => "Sunrise",
            PrayerSlot::Dhuhr => "Dhuhr",
            PrayerSlot::Asr => "Asr",
            PrayerSlot::Maghrib => "Maghrib",
            PrayerSlot::Isha => "Isha",
        }
    }

    /// Ordinal position in the canonical sequence.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

impl fmt::Display for PrayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A persistable field of a daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Slot(PrayerSlot),
    HijriDate,
}

impl Field {
    /// All fields, slots first.
    pub const ALL: [Field; 7] = [
        Field::Slot(PrayerSlot::Fajr),
        Field::Slot(PrayerSlot::Sunrise),
        Field::Slot(PrayerSlot::Dhuhr),
        Field::Slot(PrayerSlot::Asr),
        Field::Slot(PrayerSlot::Maghrib),
        Field::Slot(PrayerSlot::Isha),
        Field::HijriDate,
    ];

    /// Key fragment used in the cache key space.
    pub fn key(self) -> &'static str {
        match self {
            Field::Slot(slot) => slot.key(),
            Field::HijriDate => "islamic_date",
        }
    }

    /// Sentinel shown when no value is cached for this field.
    pub fn sentinel(self) -> &'static str {
        match self {
            Field::Slot(_) => TIME_SENTINEL,
            Field::HijriDate => HIJRI_SENTINEL,
        }
    }

    /// Date-scoped cache key: `<field>_<dd-MM-yyyy>`.
    pub fn storage_key(self, date: &str) -> String {
        format!("{}_{}", self.key(), date)
    }
}

/// Prayer data for a single Gregorian day.
///
/// Records are usually partial: times and the Hijri date arrive from
/// independent sources and independent fetch outcomes. A populated field
/// is only ever replaced by a newer fetch, never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyPrayerRecord {
    /// Calendar day key in `dd-MM-yyyy` form
    pub date: String,

    /// `HH:mm` time text per slot, in canonical slot order
    pub times: [Option<String>; 6],

    /// Hijri date display text
    pub hijri_date: Option<String>,
}

impl DailyPrayerRecord {
    /// Create an empty record for a date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Create a record with all six time fields set.
    pub fn with_times(date: impl Into<String>, times: [String; 6]) -> Self {
        Self {
            date: date.into(),
            times: times.map(Some),
            hijri_date: None,
        }
    }

    /// Create a record with only the Hijri date set.
    pub fn with_hijri(date: impl Into<String>, hijri: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            times: Default::default(),
            hijri_date: Some(hijri.into()),
        }
    }

    /// Time text for a slot, if populated.
    pub fn time(&self, slot: PrayerSlot) -> Option<&str> {
        self.times[slot.index()].as_deref()
    }

    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.times.iter().all(Option::is_none) && self.hijri_date.is_none()
    }

    /// Iterate the populated `(field, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        let times = PrayerSlot::ALL.iter().filter_map(|slot| {
            self.times[slot.index()]
                .as_deref()
                .map(|v| (Field::Slot(*slot), v))
        });
        let hijri = self
            .hijri_date
            .as_deref()
            .map(|v| (Field::HijriDate, v))
            .into_iter();
        times.chain(hijri)
    }
}
