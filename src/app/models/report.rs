//! Report and statistics structures
//!
//! Aggregates handed to the service and HTTP layers. None of these are
//! persisted; they are recomputed from store state on demand.

use super::{Contact, RawRowSnapshot, RowError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time summary of a load pass
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Valid plus invalid rows; fully blank rows are not counted
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub errors: Vec<RowError>,
    pub invalid_rows_data: Vec<RawRowSnapshot>,
    pub load_timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    /// Percentage of counted rows that loaded cleanly
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.valid_rows as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// True when every counted row loaded cleanly
    pub fn is_clean(&self) -> bool {
        self.invalid_rows == 0 && self.errors.is_empty()
    }
}

/// Error groupings for presentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub errors_by_field: BTreeMap<String, usize>,
    pub errors_by_kind: BTreeMap<String, usize>,
    /// Most frequent messages first
    pub most_common_errors: Vec<CommonError>,
}

/// A recurring validation message and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommonError {
    pub field: String,
    pub message: String,
    pub count: usize,
}

/// Load state of the store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatus {
    pub is_loaded: bool,
    pub last_load_time: Option<DateTime<Utc>>,
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub error_count: usize,
}

/// Counters for the index and search cache
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// `linear` or `indexed`
    pub strategy: String,
    pub indexed_keys: usize,
    pub indexed_emails: usize,
    pub cached_searches: usize,
    pub cache_capacity: usize,
    pub search_count: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Percentage of cache lookups that hit, 0 before the first lookup
    pub cache_hit_rate: f64,
}

impl IndexStats {
    pub fn hit_rate(cache_hits: u64, cache_misses: u64) -> f64 {
        let lookups = cache_hits + cache_misses;
        if lookups == 0 {
            0.0
        } else {
            (cache_hits as f64 / lookups as f64) * 100.0
        }
    }
}

/// One page of contacts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult {
    pub data: Vec<Contact>,
    /// Zero-based page index
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Aggregate statistics over the loaded contacts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total: usize,
    pub total_errors: usize,
    pub total_invalid: usize,
    pub valid_percentage: f64,
    pub total_domains: usize,
    pub top_domains: Vec<DomainStats>,
    pub field_stats: BTreeMap<String, FieldStats>,
    pub timestamp: DateTime<Utc>,
}

/// Email domain frequency
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainStats {
    pub domain: String,
    pub count: usize,
    pub percentage: f64,
}

/// Completeness of one contact field
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    pub unique_values: usize,
    pub empty_values: usize,
    /// Percentage of non-empty values
    pub completeness: f64,
}
