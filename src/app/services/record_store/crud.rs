//! Create, update and delete
//!
//! Each mutation holds the write lock, applies the change, writes the file
//! and only then touches the index. A failed write restores the previous
//! collection so memory and disk never disagree.

use tracing::{info, warn};

use super::ContactStore;
use crate::app::models::Contact;
use crate::{Error, Result};

impl ContactStore {
    /// Append a new contact
    ///
    /// # Errors
    /// * `Error::Conflict` if the key is already present (nothing is written)
    /// * `Error::Io` if the file cannot be written
    pub fn create(&self, contact: Contact) -> Result<Contact> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        if state.position(contact.key).is_some() {
            return Err(Error::conflict(contact.key));
        }

        state.contacts.push(contact.clone());
        if let Err(e) = self.persist(&state.contacts) {
            state.contacts.pop();
            warn!("Create of contact {} rolled back: {}", contact.key, e);
            return Err(e);
        }

        let position = state.contacts.len() - 1;
        state.strategy.on_insert(&contact, position);

        info!("Created contact {}", contact.key);
        Ok(contact)
    }

    /// Replace the contact with the same key
    ///
    /// # Errors
    /// * `Error::NotFound` if no contact has this key
    /// * `Error::Io` if the file cannot be written
    pub fn update(&self, contact: Contact) -> Result<Contact> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let position = state
            .position(contact.key)
            .ok_or_else(|| Error::not_found(contact.key))?;

        let previous = std::mem::replace(&mut state.contacts[position], contact.clone());
        if let Err(e) = self.persist(&state.contacts) {
            state.contacts[position] = previous;
            warn!("Update of contact {} rolled back: {}", contact.key, e);
            return Err(e);
        }

        state
            .strategy
            .on_update(&state.contacts, &previous.email, &contact.email);

        info!("Updated contact {}", contact.key);
        Ok(contact)
    }

    /// Remove the contact with `key`
    ///
    /// The last contact takes the removed slot, so collection order is not
    /// preserved across deletes.
    ///
    /// # Errors
    /// * `Error::NotFound` if no contact has this key (nothing is written)
    /// * `Error::Io` if the file cannot be written
    pub fn delete(&self, key: i64) -> Result<Contact> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let position = state.position(key).ok_or_else(|| Error::not_found(key))?;

        let removed = state.contacts.swap_remove(position);
        if let Err(e) = self.persist(&state.contacts) {
            // Undo the swap_remove exactly
            state.contacts.push(removed);
            let last = state.contacts.len() - 1;
            state.contacts.swap(position, last);
            warn!("Delete of contact {} rolled back: {}", key, e);
            return Err(e);
        }

        state.strategy.on_remove(&state.contacts);

        info!("Deleted contact {}", key);
        Ok(removed)
    }
}
