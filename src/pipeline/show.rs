// src/pipeline/show.rs

//! Console rendering of one cached day.
//!
//! This is the read-only display surface: it only looks at the store and
//! the resolver, never at the network.

use chrono::{Local, NaiveDate};

use crate::models::{DailyPrayerRecord, Field, HIJRI_SENTINEL, PrayerSlot};
use crate::resolver::current_slot;
use crate::store::PrayerStore;
use crate::utils::{KEY_DATE_FORMAT, format_time_12h, today_key};

/// Print the record for a date; defaults to today.
///
/// The current slot is only marked when showing today, since "current"
/// is defined against the wall clock.
pub async fn run_show(store: &dyn PrayerStore, date: Option<String>) {
    let today = today_key();
    let date = date.unwrap_or_else(|| today.clone());
    let record = store.load_record(&date).await;

    let current = if date == today {
        Some(current_slot(&record, Local::now().time()))
    } else {
        None
    };

    print!("{}", render_day(&record, current));
}

/// Print the current slot and its raw time.
pub async fn run_current(store: &dyn PrayerStore) {
    let record = store.load_record(&today_key()).await;
    let slot = current_slot(&record, Local::now().time());
    let time = record
        .time(slot)
        .unwrap_or_else(|| Field::Slot(slot).sentinel());
    println!("{} {}", slot.display_name(), time);
}

/// Render a day as display text. Missing fields show their sentinels.
fn render_day(record: &DailyPrayerRecord, current: Option<PrayerSlot>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", header_line(&record.date)));
    out.push_str(&format!(
        "{}\n\n",
        record.hijri_date.as_deref().unwrap_or(HIJRI_SENTINEL)
    ));

    for slot in PrayerSlot::ALL {
        let raw = record.time(slot).unwrap_or_else(|| Field::Slot(slot).sentinel());
        let marker = if current == Some(slot) { '\u{25b8}' } else { ' ' };
        out.push_str(&format!(
            "{} {:<8} {:>8}\n",
            marker,
            slot.display_name(),
            format_time_12h(raw)
        ));
    }
    out
}

/// Weekday plus long Gregorian date, e.g. "Wednesday, 14 May 2025".
fn header_line(date_key: &str) -> String {
    match NaiveDate::parse_from_str(date_key, KEY_DATE_FORMAT) {
        Ok(date) => date.format("%A, %-d %B %Y").to_string(),
        Err(_) => date_key.to_string(),
    }
}
