//! Write-through persistence

use tracing::{debug, info};

use super::ContactStore;
use crate::Result;
use crate::app::models::Contact;
use crate::app::services::row_parser::write_contacts;

impl ContactStore {
    /// Rewrite the source file from the current collection
    pub fn save(&self) -> Result<()> {
        let state = self.state.read();
        self.persist(&state.contacts)?;
        info!(
            "Saved {} contacts to {}",
            state.contacts.len(),
            self.source_path().display()
        );
        Ok(())
    }

    /// Write `contacts` to the source file; the caller holds the lock
    pub(crate) fn persist(&self, contacts: &[Contact]) -> Result<()> {
        debug!(
            "Persisting {} contacts to {}",
            contacts.len(),
            self.source_path().display()
        );
        write_contacts(self.source_path(), contacts)
    }
}
