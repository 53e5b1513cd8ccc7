//! CSV source reading and writing
//!
//! The source is a flat CSV file: a header row followed by one row per
//! contact. Reading is deliberately permissive (ragged rows, invalid UTF-8)
//! because the row parser reports those problems per row instead.

use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::app::models::Contact;
use crate::constants::HEADER;
use crate::{Error, Result};

/// Read every row of a CSV file as raw strings, header included
///
/// Fails with an I/O error if the file cannot be opened, and with a format
/// error if it contains no rows at all.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).map_err(|e| {
        Error::io(
            format!("Failed to open contacts file {}", path.display()),
            e,
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| {
            Error::csv(
                path.display().to_string(),
                format!("Failed to read row {}", rows.len() + 1),
                e,
            )
        })?;

        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    if rows.is_empty() {
        return Err(Error::format(
            path.display().to_string(),
            "File contains no rows",
        ));
    }

    debug!("Read {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Rewrite the file with the header and one row per contact, in order
pub fn write_contacts(path: &Path, contacts: &[Contact]) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::io(
            format!("Failed to create contacts file {}", path.display()),
            e,
        )
    })?;

    let mut writer = csv::Writer::from_writer(file);
    let file_name = || path.display().to_string();

    writer
        .write_record(HEADER)
        .map_err(|e| Error::csv(file_name(), "Failed to write header", e))?;

    for contact in contacts {
        writer.write_record(contact.to_row()).map_err(|e| {
            Error::csv(
                file_name(),
                format!("Failed to write contact {}", contact.key),
                e,
            )
        })?;
    }

    writer.flush().map_err(|e| {
        Error::io(
            format!("Failed to flush contacts file {}", path.display()),
            e,
        )
    })?;

    debug!("Wrote {} contacts to {}", contacts.len(), path.display());
    Ok(())
}
