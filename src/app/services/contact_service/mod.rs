//! Contact service: business rules over the record store
//!
//! Validates API input, maps store outcomes to library errors, and builds
//! the listing, statistics and correction views served over HTTP. All
//! methods are synchronous; store writes touch the file system, so async
//! callers should run them on a blocking thread.

use std::sync::Arc;
use tracing::{debug, info};

use crate::app::models::{
    Contact, ContactPayload, FieldError, IndexStats, LoadStatus, RawRowSnapshot, RowError,
    SearchCriteria, ValidationReport,
};
use crate::app::services::contact_validator::{validate_contact, validate_key, validate_search};
use crate::app::services::record_store::ContactStore;
use crate::app::services::validation_report::group_by_row;
use crate::{Error, Result};

pub mod pagination;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use pagination::PageRequest;

/// Business layer shared by the HTTP handlers and the CLI
#[derive(Debug, Clone)]
pub struct ContactService {
    store: Arc<ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<ContactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ContactStore> {
        &self.store
    }

    pub fn get_all(&self) -> Vec<Contact> {
        self.store.get_all()
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// # Errors
    /// * `Error::Validation` for a non-positive key
    /// * `Error::NotFound` if no contact has this key
    pub fn get(&self, key: i64) -> Result<Contact> {
        ensure_valid_key(key)?;
        self.store.get(key)
    }

    /// Validate and create a contact
    ///
    /// # Errors
    /// * `Error::Validation` listing every field problem
    /// * `Error::Conflict` if the key is taken
    /// * `Error::Io` if the file cannot be written
    pub fn create(&self, payload: ContactPayload) -> Result<Contact> {
        let contact = payload.into_contact(None);
        let errors = validate_contact(&contact);
        if !errors.is_empty() {
            debug!("Rejected create for key {}: {} field errors", contact.key, errors.len());
            return Err(Error::validation(errors));
        }

        self.store.create(contact)
    }

    /// Validate and replace the contact at `key`; the path key wins
    ///
    /// # Errors
    /// * `Error::Validation` for a non-positive key or invalid fields
    /// * `Error::NotFound` if no contact has this key
    /// * `Error::Io` if the file cannot be written
    pub fn update(&self, key: i64, payload: ContactPayload) -> Result<Contact> {
        ensure_valid_key(key)?;
        if !self.store.exists(key) {
            return Err(Error::not_found(key));
        }

        let contact = payload.into_contact(Some(key));
        let errors = validate_contact(&contact);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        self.store.update(contact)
    }

    /// # Errors
    /// * `Error::Validation` for a non-positive key
    /// * `Error::NotFound` if no contact has this key
    /// * `Error::Io` if the file cannot be written
    pub fn delete(&self, key: i64) -> Result<Contact> {
        ensure_valid_key(key)?;
        self.store.delete(key)
    }

    /// Search contacts; empty criteria return every contact
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Contact>> {
        let errors = validate_search(criteria);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        if criteria.is_empty() {
            return Ok(self.store.get_all());
        }
        Ok(self.store.search(criteria))
    }

    pub fn validation_report(&self) -> ValidationReport {
        self.store.report()
    }

    pub fn load_errors(&self) -> Vec<RowError> {
        self.store.load_errors()
    }

    /// Rejected rows in a shape ready for correction
    ///
    /// Uses the stored snapshots; if there are none but row errors exist,
    /// recovers one snapshot per row from the errors, ordered by row.
    pub fn invalid_rows_for_correction(&self) -> Vec<RawRowSnapshot> {
        let snapshots = self.store.invalid_rows();
        if !snapshots.is_empty() {
            return snapshots;
        }

        let errors = self.store.load_errors();
        group_by_row(&errors)
            .into_values()
            .map(|row_errors| {
                if let Some(snapshot) = row_errors.first().and_then(|e| e.row_data.clone()) {
                    return snapshot;
                }
                let mut snapshot = RawRowSnapshot::default();
                for error in &row_errors {
                    snapshot.add_error(&error.field, &error.message);
                }
                snapshot
            })
            .collect()
    }

    pub fn status(&self) -> LoadStatus {
        self.store.status()
    }

    pub fn index_stats(&self) -> IndexStats {
        self.store.index_stats()
    }

    /// Reload the source file and report on the result
    pub fn reload(&self) -> Result<ValidationReport> {
        let result = self.store.reload()?;
        let report = self.store.report();
        info!(
            "Reload complete: {} valid, {} invalid, {} errors",
            report.valid_rows,
            report.invalid_rows,
            result.errors.len()
        );
        Ok(report)
    }
}

fn ensure_valid_key(key: i64) -> Result<()> {
    match validate_key(key) {
        Some(error) => Err(Error::validation(vec![error])),
        None => Ok(()),
    }
}

/// Field errors for a path segment that is not a number
pub fn invalid_key_error(raw: &str) -> Error {
    Error::validation(vec![FieldError::key(format!(
        "Key must be a number greater than 0, got '{}'",
        raw
    ))])
}
