//! Test utilities for row parser testing
//!
//! Shared helpers for building raw rows and on-disk CSV fixtures.

use std::io::Write;
use tempfile::NamedTempFile;

mod source_tests;

/// Build a raw row from string slices
pub fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Build a source (header plus data rows) from string slices
pub fn source_rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    let mut rows = vec![cells(&["key", "name", "email", "phone"])];
    rows.extend(data.iter().map(|row| cells(row)));
    rows
}

/// Create a temporary CSV file with the given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// The three-row fixture: one valid row, one with two errors, one duplicate
pub fn mixed_csv() -> &'static str {
    "key,name,email,phone\n\
     1,Ana,ana@x.com,5551234567\n\
     0,Bob,bob@x.com,123\n\
     1,Carl,c@x.com,5550000000\n"
}
