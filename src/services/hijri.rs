// src/services/hijri.rs

//! Parser for the monthly Hijri calendar table.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{DailyPrayerRecord, HijriSelectors};
use crate::services::{collect_text, parse_selector};
use crate::utils::rekey_long_date;

/// Parses the Hijri calendar table into Hijri-only records.
pub struct HijriCalendarParser {
    selectors: HijriSelectors,
}

impl HijriCalendarParser {
    /// Create a parser with the given selector spec.
    pub fn new(selectors: HijriSelectors) -> Self {
        Self { selectors }
    }

    /// Parse a fetched document into Hijri-date records keyed by
    /// `dd-MM-yyyy`.
    ///
    /// The source keys its rows by a long textual Gregorian date
    /// ("Tuesday, May 14, 2025"); rows whose date fails the strict parse
    /// are logged and skipped.
    pub fn parse(&self, html: &str) -> Result<Vec<DailyPrayerRecord>> {
        let document = Html::parse_document(html);

        let row_sel = parse_selector(&self.selectors.row)?;
        let gregorian_sel = parse_selector(&self.selectors.gregorian)?;
        let hijri_sel = parse_selector(&self.selectors.hijri)?;

        let mut records = Vec::new();
        for row in document.select(&row_sel) {
            if let Some(record) = Self::parse_row(&row, &gregorian_sel, &hijri_sel) {
                records.push(record);
            }
        }

        log::debug!("Parsed {} Hijri calendar rows", records.len());
        Ok(records)
    }

    fn parse_row(
        row: &ElementRef,
        gregorian_sel: &Selector,
        hijri_sel: &Selector,
    ) -> Option<DailyPrayerRecord> {
        let gregorian = row.select(gregorian_sel).next().map(|e| collect_text(&e))?;

        let Some(date) = rekey_long_date(&gregorian) else {
            log::warn!("Skipping Hijri row with unparseable date '{}'", gregorian);
            return None;
        };

        let hijri = row
            .select(hijri_sel)
            .next()
            .map(|e| Self::clean_hijri(&collect_text(&e)))?;
        if hijri.is_empty() {
            log::debug!("Skipping Hijri row for {} with empty text", date);
            return None;
        }

        Some(DailyPrayerRecord::with_hijri(date, hijri))
    }

    /// The source suffixes every entry with " Hijri".
    fn clean_hijri(raw: &str) -> String {
        raw.trim_end_matches(" Hijri").trim().to_string()
    }
}
