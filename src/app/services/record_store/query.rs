//! Contact lookup, search and status queries
//!
//! Every read goes through the active [`ReadStrategy`](super::ReadStrategy);
//! results are copies, so callers never hold the lock.

use tracing::trace;

use super::ContactStore;
use super::index::ReadStrategy;
use crate::app::models::{
    Contact, IndexStats, LoadStatus, RawRowSnapshot, RowError, SearchCriteria, ValidationReport,
};
use crate::app::services::row_parser::ParseStats;
use crate::app::services::validation_report::build_report;
use crate::{Error, Result};

impl ContactStore {
    /// Copy of every contact in collection order
    pub fn get_all(&self) -> Vec<Contact> {
        self.state.read().contacts.clone()
    }

    /// Contact with `key`
    ///
    /// # Errors
    /// * `Error::NotFound` if no contact has this key
    pub fn get(&self, key: i64) -> Result<Contact> {
        let state = self.state.read();
        state
            .position(key)
            .map(|position| state.contacts[position].clone())
            .ok_or_else(|| Error::not_found(key))
    }

    pub fn exists(&self, key: i64) -> bool {
        self.state.read().position(key).is_some()
    }

    /// First contact whose email equals `email`, ignoring case
    pub fn find_by_email(&self, email: &str) -> Option<Contact> {
        let state = self.state.read();
        state
            .strategy
            .email_position(&state.contacts, email)
            .map(|position| state.contacts[position].clone())
    }

    /// Contacts matching every set criterion, in collection order
    ///
    /// Empty criteria match everything; callers decide whether that is
    /// what they want.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Contact> {
        self.counters.record_search();
        let state = self.state.read();

        let index = match &state.strategy {
            ReadStrategy::Linear => return linear_search(&state.contacts, criteria),
            ReadStrategy::Indexed(index) => index,
        };

        if let Some(results) = index.cached(criteria) {
            self.counters.record_hit();
            trace!("Search cache hit for {}", criteria.cache_key());
            return results;
        }
        self.counters.record_miss();

        let results = match criteria.key_filter().map(str::parse::<i64>) {
            Some(Ok(key)) => state
                .position(key)
                .map(|position| &state.contacts[position])
                .filter(|contact| criteria.matches(contact))
                .cloned()
                .into_iter()
                .collect(),
            Some(Err(_)) => Vec::new(),
            None => linear_search(&state.contacts, criteria),
        };

        index.remember(criteria, &results);
        results
    }

    pub fn len(&self) -> usize {
        self.state.read().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().contacts.is_empty()
    }

    /// Row errors from the last load
    pub fn load_errors(&self) -> Vec<RowError> {
        self.state.read().errors.clone()
    }

    /// Snapshots of the rows rejected by the last load
    pub fn invalid_rows(&self) -> Vec<RawRowSnapshot> {
        self.state.read().invalid_rows.clone()
    }

    /// Validation report for the current state
    pub fn report(&self) -> ValidationReport {
        let state = self.state.read();
        build_report(&state.contacts, &state.errors, &state.invalid_rows)
    }

    pub fn status(&self) -> LoadStatus {
        let state = self.state.read();
        LoadStatus {
            is_loaded: state.is_loaded(),
            last_load_time: state.last_load_time,
            total_records: state.contacts.len() + state.invalid_rows.len(),
            valid_records: state.contacts.len(),
            invalid_records: state.invalid_rows.len(),
            error_count: state.errors.len(),
        }
    }

    /// Row counters of the last load, blank rows included
    pub fn parse_stats(&self) -> ParseStats {
        self.state.read().parse_stats.clone()
    }

    pub fn index_stats(&self) -> IndexStats {
        let state = self.state.read();
        let (search_count, cache_hits, cache_misses) = self.counters.snapshot();

        let (indexed_keys, indexed_emails, cached_searches, cache_capacity) = match &state.strategy
        {
            ReadStrategy::Linear => (0, 0, 0, self.config.cache_capacity),
            ReadStrategy::Indexed(index) => (
                index.indexed_keys(),
                index.indexed_emails(),
                index.cached_searches(),
                index.cache_capacity(),
            ),
        };

        IndexStats {
            strategy: state.strategy.name().to_string(),
            indexed_keys,
            indexed_emails,
            cached_searches,
            cache_capacity,
            search_count,
            cache_hits,
            cache_misses,
            cache_hit_rate: IndexStats::hit_rate(cache_hits, cache_misses),
        }
    }
}

fn linear_search(contacts: &[Contact], criteria: &SearchCriteria) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| criteria.matches(contact))
        .cloned()
        .collect()
}
