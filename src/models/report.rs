use serde::{Deserialize, Serialize};
use std::fmt;

/// A row the pipeline rejected, with the reason it was dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub station_id: String,
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let station = if self.station_id.is_empty() {
            "<none>"
        } else {
            &self.station_id
        };
        write!(f, "row {} [station {}]: {}", self.row, station, self.reason)
    }
}

/// Outcome of one conversion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub processed: usize,
    pub emitted: usize,
    pub skipped: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

impl BatchResult {
    pub fn record_emitted(&mut self) {
        self.processed += 1;
        self.emitted += 1;
    }

    pub fn record_skipped(&mut self, skip: SkippedRow) {
        self.processed += 1;
        self.skipped += 1;
        self.skipped_rows.push(skip);
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Processed {} rows: {} records written, {} rows skipped",
            self.processed, self.emitted, self.skipped
        );
        for skip in &self.skipped_rows {
            summary.push_str("\n  ");
            summary.push_str(&skip.to_string());
        }
        summary
    }
}
