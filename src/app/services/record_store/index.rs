//! Index and search cache for large contact files
//!
//! Above the configured threshold the store switches from linear scans to
//! a key index, an email index and a bounded search-result cache. The
//! indexed path must return exactly what the linear path would.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::app::models::{Contact, SearchCriteria};

/// Read path selected after each load
#[derive(Debug, Default)]
pub enum ReadStrategy {
    /// Scan the collection for every lookup
    #[default]
    Linear,

    /// Hash lookups plus a search cache
    Indexed(ContactIndex),
}

impl ReadStrategy {
    /// Pick the strategy for a freshly loaded collection
    pub fn select(contacts: &[Contact], threshold: usize, cache_capacity: usize) -> Self {
        if contacts.len() > threshold {
            let index = ContactIndex::build(contacts, cache_capacity);
            info!(
                "Index activated: {} contacts exceed threshold of {} ({} keys, {} emails)",
                contacts.len(),
                threshold,
                index.by_key.len(),
                index.by_email.len()
            );
            Self::Indexed(index)
        } else {
            debug!(
                "Using linear lookups for {} contacts (threshold {})",
                contacts.len(),
                threshold
            );
            Self::Linear
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Indexed(_) => "indexed",
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed(_))
    }

    /// Position of the contact with `key`
    pub fn position(&self, contacts: &[Contact], key: i64) -> Option<usize> {
        match self {
            Self::Linear => contacts.iter().position(|c| c.key == key),
            Self::Indexed(index) => index.by_key.get(&key).copied(),
        }
    }

    /// Position of the first contact whose email matches, ignoring case
    pub fn email_position(&self, contacts: &[Contact], email: &str) -> Option<usize> {
        let email = email.to_lowercase();
        match self {
            Self::Linear => contacts
                .iter()
                .position(|c| c.email.to_lowercase() == email),
            Self::Indexed(index) => index.by_email.get(&email).copied(),
        }
    }

    /// A contact was appended at `position`
    pub fn on_insert(&mut self, contact: &Contact, position: usize) {
        if let Self::Indexed(index) = self {
            index.by_key.insert(contact.key, position);
            index
                .by_email
                .entry(contact.email.to_lowercase())
                .or_insert(position);
            index.clear_cache();
        }
    }

    /// A contact was replaced in place
    pub fn on_update(&mut self, contacts: &[Contact], previous_email: &str, current_email: &str) {
        if let Self::Indexed(index) = self {
            if previous_email.to_lowercase() != current_email.to_lowercase() {
                index.rebuild_emails(contacts);
            }
            index.clear_cache();
        }
    }

    /// Positions shifted, so every map is rebuilt
    pub fn on_remove(&mut self, contacts: &[Contact]) {
        if let Self::Indexed(index) = self {
            index.rebuild(contacts);
            index.clear_cache();
        }
    }
}

/// Position maps and the search cache
#[derive(Debug)]
pub struct ContactIndex {
    by_key: HashMap<i64, usize>,
    /// Lower-cased email to first position holding it
    by_email: HashMap<String, usize>,
    cache: Mutex<SearchCache>,
}

impl ContactIndex {
    pub fn build(contacts: &[Contact], cache_capacity: usize) -> Self {
        let mut index = Self {
            by_key: HashMap::with_capacity(contacts.len()),
            by_email: HashMap::with_capacity(contacts.len()),
            cache: Mutex::new(SearchCache::new(cache_capacity)),
        };
        index.rebuild(contacts);
        index
    }

    fn rebuild(&mut self, contacts: &[Contact]) {
        self.by_key.clear();
        for (position, contact) in contacts.iter().enumerate() {
            self.by_key.insert(contact.key, position);
        }
        self.rebuild_emails(contacts);
    }

    fn rebuild_emails(&mut self, contacts: &[Contact]) {
        self.by_email.clear();
        for (position, contact) in contacts.iter().enumerate() {
            self.by_email
                .entry(contact.email.to_lowercase())
                .or_insert(position);
        }
    }

    pub fn indexed_keys(&self) -> usize {
        self.by_key.len()
    }

    pub fn indexed_emails(&self) -> usize {
        self.by_email.len()
    }

    pub fn cached_searches(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.lock().capacity
    }

    pub fn cached(&self, criteria: &SearchCriteria) -> Option<Vec<Contact>> {
        self.cache.lock().get(&criteria.cache_key())
    }

    pub fn remember(&self, criteria: &SearchCriteria, results: &[Contact]) {
        self.cache.lock().insert(criteria.cache_key(), results.to_vec());
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

/// Bounded search-result cache, flushed entirely when full
#[derive(Debug)]
pub struct SearchCache {
    entries: HashMap<String, Vec<Contact>>,
    capacity: usize,
}

impl SearchCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<Contact>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, results: Vec<Contact>) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            debug!("Search cache full ({} entries), flushing", self.entries.len());
            self.entries.clear();
        }
        self.entries.insert(key, results);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search counters, updated from readers without the write lock
#[derive(Debug, Default)]
pub struct SearchCounters {
    searches: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SearchCounters {
    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// `(searches, hits, misses)`
    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.searches.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
