//! Validation report aggregation
//!
//! Builds [`ValidationReport`]s from the diagnostics of a load and offers
//! the groupings used by the report summary and the correction views.

use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

use crate::app::models::{
    CommonError, Contact, RawRowSnapshot, ReportSummary, RowError, ValidationReport,
};

/// Number of entries kept in `most_common_errors`
const MOST_COMMON_LIMIT: usize = 10;

/// Aggregate a load's diagnostics into a report
///
/// Never fails; a clean load yields a report with empty error lists.
pub fn build_report(
    contacts: &[Contact],
    errors: &[RowError],
    invalid_rows: &[RawRowSnapshot],
) -> ValidationReport {
    let summary = ReportSummary {
        errors_by_field: count_by_field(errors),
        errors_by_kind: errors_by_kind(errors),
        most_common_errors: most_common_errors(invalid_rows, MOST_COMMON_LIMIT),
    };

    ValidationReport {
        total_rows: contacts.len() + invalid_rows.len(),
        valid_rows: contacts.len(),
        invalid_rows: invalid_rows.len(),
        errors: errors.to_vec(),
        invalid_rows_data: invalid_rows.to_vec(),
        load_timestamp: Utc::now(),
        summary,
    }
}

/// Row errors grouped by field name
pub fn group_by_field(errors: &[RowError]) -> BTreeMap<String, Vec<RowError>> {
    let mut groups: BTreeMap<String, Vec<RowError>> = BTreeMap::new();
    for error in errors {
        groups
            .entry(error.field.clone())
            .or_default()
            .push(error.clone());
    }
    groups
}

/// Row errors grouped by row number
pub fn group_by_row(errors: &[RowError]) -> BTreeMap<usize, Vec<RowError>> {
    let mut groups: BTreeMap<usize, Vec<RowError>> = BTreeMap::new();
    for error in errors {
        groups.entry(error.row).or_default().push(error.clone());
    }
    groups
}

/// Number of errors per field
pub fn count_by_field(errors: &[RowError]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for error in errors {
        *counts.entry(error.field.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of errors per kind
pub fn errors_by_kind(errors: &[RowError]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for error in errors {
        *counts.entry(error.kind.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// The `limit` most frequent `(field, message)` pairs across invalid rows
///
/// Ordered by count, descending; equal counts keep first-seen order.
pub fn most_common_errors(invalid_rows: &[RawRowSnapshot], limit: usize) -> Vec<CommonError> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut ranked: Vec<CommonError> = Vec::new();

    for (field, message) in invalid_rows.iter().flat_map(RawRowSnapshot::field_messages) {
        let entry_key = (field.to_string(), message.to_string());
        match positions.get(&entry_key) {
            Some(&position) => ranked[position].count += 1,
            None => {
                positions.insert(entry_key, ranked.len());
                ranked.push(CommonError {
                    field: field.to_string(),
                    message: message.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
