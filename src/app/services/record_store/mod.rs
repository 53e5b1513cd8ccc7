//! CSV-backed contact record store
//!
//! The store keeps a validated in-memory copy of the contacts file together
//! with the diagnostics of the last load. The file stays the source of
//! truth: every mutation is written through before it returns.
//!
//! One `parking_lot::RwLock` guards the collection, the diagnostics and the
//! index together. Readers share it; load and mutations take it exclusively.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::Path;
use tracing::warn;

use crate::Result;
use crate::app::models::{Contact, RawRowSnapshot, RowError};
use crate::app::services::row_parser::ParseStats;
use crate::config::StoreConfig;

pub mod crud;
pub mod index;
pub mod loader;
pub mod persistence;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use index::{ContactIndex, ReadStrategy, SearchCache, SearchCounters};

/// Contact store over a single CSV file
#[derive(Debug)]
pub struct ContactStore {
    pub(crate) config: StoreConfig,
    pub(crate) state: RwLock<StoreState>,
    pub(crate) counters: SearchCounters,
}

/// Everything replaced by a load
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    /// Valid contacts, in file order until the first delete
    pub(crate) contacts: Vec<Contact>,

    pub(crate) errors: Vec<RowError>,

    pub(crate) invalid_rows: Vec<RawRowSnapshot>,

    pub(crate) strategy: ReadStrategy,

    pub(crate) parse_stats: ParseStats,

    pub(crate) last_load_time: Option<DateTime<Utc>>,
}

impl StoreState {
    pub(crate) fn is_loaded(&self) -> bool {
        self.last_load_time.is_some()
    }

    pub(crate) fn position(&self, key: i64) -> Option<usize> {
        self.strategy.position(&self.contacts, key)
    }
}

impl ContactStore {
    /// Create an empty, not yet loaded store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: RwLock::new(StoreState::default()),
            counters: SearchCounters::default(),
        }
    }

    /// Create a store and load its source file
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    /// Create a store and try to load it, staying empty if the load fails
    ///
    /// Used at server startup: a missing or unreadable file is logged and the
    /// store stays available, so a later create writes the file and a reload
    /// can pick it up.
    ///
    /// # Errors
    /// `Error::Configuration` if `config` is invalid.
    pub fn open_or_empty(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let store = Self::new(config);
        if let Err(e) = store.load() {
            warn!(
                "Starting with an empty store, initial load of {} failed: {}",
                store.source_path().display(),
                e
            );
        }
        Ok(store)
    }

    /// Path of the backing CSV file
    pub fn source_path(&self) -> &Path {
        &self.config.source_path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
