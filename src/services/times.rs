// src/services/times.rs

//! Parser for the monthly prayer-time table.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{DailyPrayerRecord, PrayerSlot, TimesSelectors};
use crate::services::{collect_text, parse_selector};

/// Index of the first time column; fajr..isha occupy cells 2-7.
const FIRST_TIME_CELL: usize = 2;

/// Minimum cell count for a usable row.
const MIN_CELLS: usize = FIRST_TIME_CELL + PrayerSlot::ALL.len();

/// Parses the monthly prayer-time table into per-day records.
pub struct PrayerTimesParser {
    selectors: TimesSelectors,
}

impl PrayerTimesParser {
    /// Create a parser with the given selector spec.
    pub fn new(selectors: TimesSelectors) -> Self {
        Self { selectors }
    }

    /// Parse a fetched document into time-only records, one per valid row.
    ///
    /// A missing table or an empty body yields an empty vector; whether
    /// that counts as a failed sub-fetch is the caller's call. Malformed
    /// rows are skipped, never fatal — partial tables are expected near
    /// month boundaries.
    pub fn parse(&self, html: &str) -> Result<Vec<DailyPrayerRecord>> {
        let document = Html::parse_document(html);

        let table_sel = parse_selector(&self.selectors.table)?;
        let row_sel = parse_selector(&self.selectors.row)?;
        let cell_sel = parse_selector(&self.selectors.cell)?;
        let date_sel = parse_selector(&self.selectors.date)?;

        let Some(table) = document.select(&table_sel).next() else {
            log::warn!(
                "Prayer-time table '{}' not found in document",
                self.selectors.table
            );
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for row in table.select(&row_sel) {
            if let Some(record) = Self::parse_row(&row, &cell_sel, &date_sel) {
                records.push(record);
            }
        }

        log::debug!("Parsed {} prayer-time rows", records.len());
        Ok(records)
    }

    /// Parse one table row; None means the row is skipped.
    fn parse_row(
        row: &ElementRef,
        cell_sel: &Selector,
        date_sel: &Selector,
    ) -> Option<DailyPrayerRecord> {
        let cells: Vec<ElementRef> = row.select(cell_sel).collect();
        if cells.len() < MIN_CELLS {
            log::warn!(
                "Skipping prayer-time row with {} cells (need at least {})",
                cells.len(),
                MIN_CELLS
            );
            return None;
        }

        // The date sits in a nested element inside the first cell,
        // already in dd-MM-yyyy form.
        let date = row
            .select(date_sel)
            .next()
            .map(|e| collect_text(&e))
            .unwrap_or_default();
        if date.is_empty() {
            log::debug!("Skipping prayer-time row with blank date");
            return None;
        }

        let mut record = DailyPrayerRecord::new(date);
        for (slot, cell) in PrayerSlot::ALL.iter().zip(&cells[FIRST_TIME_CELL..]) {
            let text = collect_text(cell);
            if !text.is_empty() {
                record.times[slot.index()] = Some(text);
            }
        }
        Some(record)
    }
}
