//! Paginated listings with a free-text filter

use serde::{Deserialize, Serialize};

use super::ContactService;
use crate::app::models::{Contact, PaginatedResult};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page selection as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageRequest {
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,

    /// Page size; 0 selects the default, larger than the maximum is clamped
    #[serde(default)]
    pub size: usize,

    /// Matched against name, email, phone and key
    #[serde(default)]
    pub search: Option<String>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn effective_size(&self) -> usize {
        match self.size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        }
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl ContactService {
    /// One page of contacts, optionally filtered by a search term
    pub fn paginated(&self, request: &PageRequest) -> PaginatedResult {
        let contacts = self.store.get_all();
        let filtered = match request.search_term() {
            Some(term) => contacts
                .into_iter()
                .filter(|contact| matches_term(contact, term))
                .collect(),
            None => contacts,
        };
        paginate(filtered, request.page, request.effective_size())
    }
}

/// True if `term` occurs in the name or email (ignoring case), phone or key
pub fn matches_term(contact: &Contact, term: &str) -> bool {
    let lower = term.to_lowercase();
    contact.name.to_lowercase().contains(&lower)
        || contact.email.to_lowercase().contains(&lower)
        || contact.phone.contains(term)
        || contact.key.to_string().contains(term)
}

/// Slice `items` into the requested page; out-of-range pages are empty
pub fn paginate(items: Vec<Contact>, page: usize, size: usize) -> PaginatedResult {
    let size = size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(size);
    let start = page.saturating_mul(size);

    let data = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(size).collect()
    };

    PaginatedResult {
        data,
        page,
        size,
        total,
        total_pages,
        has_next: page.saturating_add(1) < total_pages,
        has_prev: page > 0,
    }
}
