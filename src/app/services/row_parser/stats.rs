//! Parsing statistics and result structures for contact loading
//!
//! This module provides the outcome of parsing a whole source file: the
//! accepted contacts, the captured diagnostics, and row counters.

use crate::app::models::{Contact, LoadResult, RawRowSnapshot, RowError};

/// Everything produced by one parse pass over a source
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Valid contacts in source order
    pub contacts: Vec<Contact>,

    /// Every row error, in row order
    pub errors: Vec<RowError>,

    /// Snapshots of rejected rows, in row order
    pub invalid_rows: Vec<RawRowSnapshot>,

    pub stats: ParseStats,
}

impl ParseOutcome {
    /// Diagnostics half of the outcome
    pub fn load_result(&self) -> LoadResult {
        LoadResult {
            errors: self.errors.clone(),
            invalid_rows: self.invalid_rows.clone(),
        }
    }
}

/// Row counters for a parse pass
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Data rows read, header excluded
    pub data_rows: usize,

    /// Fully blank rows skipped without diagnostics
    pub blank_rows: usize,

    pub valid_rows: usize,

    pub invalid_rows: usize,

    /// Total row errors across invalid rows
    pub error_count: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            data_rows: 0,
            blank_rows: 0,
            valid_rows: 0,
            invalid_rows: 0,
            error_count: 0,
        }
    }

    /// Rows that count towards a validation report
    pub fn counted_rows(&self) -> usize {
        self.valid_rows + self.invalid_rows
    }

    /// Calculate success rate as a percentage of counted rows
    pub fn success_rate(&self) -> f64 {
        let counted = self.counted_rows();
        if counted == 0 {
            0.0
        } else {
            (self.valid_rows as f64 / counted as f64) * 100.0
        }
    }

    /// Get a summary string of the parse pass
    pub fn summary(&self) -> String {
        format!(
            "{} data rows: {} valid, {} invalid ({} errors), {} blank",
            self.data_rows, self.valid_rows, self.invalid_rows, self.error_count, self.blank_rows
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
