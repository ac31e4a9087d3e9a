// src/models/selectors.rs

//! CSS selectors for scraping the two remote sources.
//!
//! Both pages are foreign, unversioned markup; everything fragile about
//! them lives here so a layout change is a config edit, not a code change.

use serde::{Deserialize, Serialize};

/// Selectors for the monthly prayer-time table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesSelectors {
    /// Selector for the table containing the monthly schedule
    #[serde(default = "default_times_table")]
    pub table: String,

    /// Selector for each body row within the table
    #[serde(default = "default_times_row")]
    pub row: String,

    /// Selector for the cells within a row
    #[serde(default = "default_times_cell")]
    pub cell: String,

    /// Selector for the date element nested inside the first cell
    #[serde(default = "default_times_date")]
    pub date: String,
}

fn default_times_table() -> String {
    "table#waktu-semua".to_string()
}

fn default_times_row() -> String {
    "tbody tr".to_string()
}

fn default_times_cell() -> String {
    "td".to_string()
}

fn default_times_date() -> String {
    "h6".to_string()
}

impl Default for TimesSelectors {
    fn default() -> Self {
        Self {
            table: default_times_table(),
            row: default_times_row(),
            cell: default_times_cell(),
            date: default_times_date(),
        }
    }
}

/// Selectors for the monthly Hijri calendar table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HijriSelectors {
    /// Selector for each calendar row
    #[serde(default = "default_hijri_row")]
    pub row: String,

    /// Selector for the long-form Gregorian date within a row
    #[serde(default = "default_hijri_gregorian")]
    pub gregorian: String,

    /// Selector for the emphasised Hijri text within a row
    #[serde(default = "default_hijri_text")]
    pub hijri: String,
}

fn default_hijri_row() -> String {
    "table.hijri-calendar tbody tr".to_string()
}

fn default_hijri_gregorian() -> String {
    "td:first-child".to_string()
}

fn default_hijri_text() -> String {
    "td strong".to_string()
}

impl Default for HijriSelectors {
    fn default() -> Self {
        Self {
            row: default_hijri_row(),
            gregorian: default_hijri_gregorian(),
            hijri: default_hijri_text(),
        }
    }
}
