//! Row parser for CSV-backed contact files
//!
//! Parses the flat four-column contact layout (`key,name,email,phone`)
//! while collecting per-row, per-field diagnostics. A bad row never aborts
//! a load: it becomes a set of [`RowError`](crate::RowError)s plus a raw
//! snapshot that keeps enough data for an operator to fix it.
//!
//! ## Architecture
//!
//! - [`source`] - Reading raw rows from, and writing contacts to, the CSV file
//! - [`parser`] - Per-row parse algorithm and the stateful load-pass parser
//! - [`field_checks`] - Individual field checks
//! - [`stats`] - Parse outcome and row counters
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contact_store::app::services::row_parser::{RowParser, read_rows};
//!
//! # fn example() -> contact_store::Result<()> {
//! let rows = read_rows(std::path::Path::new("contacts.csv"))?;
//! let outcome = RowParser::parse_all(&rows);
//!
//! println!("{}", outcome.stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod field_checks;
pub mod parser;
pub mod source;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{ParsedRow, RowParser, parse_row};
pub use source::{read_rows, write_contacts};
pub use stats::{ParseOutcome, ParseStats};
