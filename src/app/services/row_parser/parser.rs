//! Core row parser implementation
//!
//! Turns raw string rows into valid contacts or row diagnostics. A parse
//! pass never fails: every problem with a data row becomes a [`RowError`]
//! and a [`RawRowSnapshot`] so the row can be corrected later.

use std::collections::HashSet;
use tracing::{debug, trace};

use super::field_checks::{
    FIELD_LAYOUT, Violation, check_email, check_key, check_not_empty, check_phone,
    structure_violation,
};
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{Contact, RawRowSnapshot, RowError};
use crate::constants::COLUMN_COUNT;

/// Result of parsing one data row
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    /// Every check passed
    Valid(Contact),

    /// At least one check failed; each error carries the final snapshot
    Invalid {
        errors: Vec<RowError>,
        snapshot: RawRowSnapshot,
    },

    /// Fully blank padding row
    Blank,
}

/// Stateful parser for one load pass
///
/// Tracks the keys accepted so far, so the first occurrence of a key wins
/// and later rows with the same key are rejected.
#[derive(Debug, Default)]
pub struct RowParser {
    accepted_keys: HashSet<i64>,
    outcome: ParseOutcome,
}

impl RowParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every data row of a source; the first row is the header
    pub fn parse_all(rows: &[Vec<String>]) -> ParseOutcome {
        let mut parser = Self::new();
        for (index, cells) in rows.iter().enumerate().skip(1) {
            parser.push_row(index, cells);
        }
        parser.finish()
    }

    /// Parse one data row and fold it into the running outcome
    pub fn push_row(&mut self, row_number: usize, cells: &[String]) {
        self.outcome.stats.data_rows += 1;

        match parse_row(row_number, cells, &self.accepted_keys) {
            ParsedRow::Valid(contact) => {
                self.accepted_keys.insert(contact.key);
                self.outcome.stats.valid_rows += 1;
                self.outcome.contacts.push(contact);
            }
            ParsedRow::Invalid { errors, snapshot } => {
                debug!(
                    "Row {} rejected with {} error(s): {}",
                    row_number,
                    errors.len(),
                    snapshot.errors.join("; ")
                );
                self.outcome.stats.invalid_rows += 1;
                self.outcome.stats.error_count += errors.len();
                self.outcome.errors.extend(errors);
                self.outcome.invalid_rows.push(snapshot);
            }
            ParsedRow::Blank => {
                trace!("Row {} is blank, skipping", row_number);
                self.outcome.stats.blank_rows += 1;
            }
        }
    }

    /// Statistics so far
    pub fn stats(&self) -> &ParseStats {
        &self.outcome.stats
    }

    /// Consume the parser and return everything collected
    pub fn finish(self) -> ParseOutcome {
        self.outcome
    }
}

/// Parse one data row against the keys already accepted in this pass
pub fn parse_row(row_number: usize, cells: &[String], accepted_keys: &HashSet<i64>) -> ParsedRow {
    let trimmed: Vec<String> = cells
        .iter()
        .take(COLUMN_COUNT)
        .map(|cell| cell.trim().to_string())
        .collect();

    // Cells past the fourth are ignored, but a row is only blank if all are
    if cells.iter().all(|cell| cell.trim().is_empty()) {
        return ParsedRow::Blank;
    }

    // The partial cells live in the snapshot; the error itself has no value
    if trimmed.len() < COLUMN_COUNT {
        return reject(
            row_number,
            RawRowSnapshot::from_cells(&trimmed),
            vec![(structure_violation(), String::new())],
        );
    }

    let mut violations: Vec<(Violation, String)> = Vec::new();

    for (&(column, field), value) in FIELD_LAYOUT.iter().zip(&trimmed) {
        if let Some(violation) = check_not_empty(column, field, value) {
            violations.push((violation, value.clone()));
        }
    }

    let (key_cell, name_cell, email_cell, phone_cell) =
        (&trimmed[0], &trimmed[1], &trimmed[2], &trimmed[3]);

    let mut key = None;
    if !key_cell.is_empty() {
        match check_key(key_cell, accepted_keys) {
            Ok(parsed) => key = Some(parsed),
            Err(violation) => violations.push((violation, key_cell.clone())),
        }
    }

    if !phone_cell.is_empty() {
        for violation in check_phone(phone_cell) {
            violations.push((violation, phone_cell.clone()));
        }
    }

    if !email_cell.is_empty() {
        if let Some(violation) = check_email(email_cell) {
            violations.push((violation, email_cell.clone()));
        }
    }

    match key {
        Some(key) if violations.is_empty() => ParsedRow::Valid(Contact::new(
            key,
            name_cell.clone(),
            email_cell.clone(),
            phone_cell.clone(),
        )),
        _ => reject(row_number, RawRowSnapshot::from_cells(&trimmed), violations),
    }
}

/// Build the invalid-row result, attaching the finished snapshot to each error
fn reject(
    row_number: usize,
    mut snapshot: RawRowSnapshot,
    violations: Vec<(Violation, String)>,
) -> ParsedRow {
    for (violation, _) in &violations {
        snapshot.add_error(violation.field, &violation.message);
    }

    let errors = violations
        .into_iter()
        .map(|(violation, value)| RowError {
            row: row_number,
            column: violation.column.to_string(),
            field: violation.field.to_string(),
            kind: violation.kind,
            value,
            message: violation.message,
            row_data: Some(snapshot.clone()),
        })
        .collect();

    ParsedRow::Invalid { errors, snapshot }
}

