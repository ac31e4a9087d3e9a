// src/services/mod.rs

//! HTML table parsers for the two remote sources.

pub mod hijri;
pub mod times;

pub use hijri::HijriCalendarParser;
pub use times::PrayerTimesParser;

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector string, mapping failures to a typed error.
pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collect and trim the text content of an element.
pub(crate) fn collect_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
