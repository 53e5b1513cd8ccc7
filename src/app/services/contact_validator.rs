//! Request validation for contact writes and searches
//!
//! Stricter than load-time validation: API writes must use a name made of
//! letters and spaces and an email from a known provider. Rows already in
//! the file are only held to the looser load rules.

use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::{Contact, FieldError, SearchCriteria};
use crate::constants::{ALLOWED_EMAIL_PROVIDERS, fields};

// `\d` would also accept non-ASCII digits, which the load-time checks reject
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s]+$").expect("name pattern is valid")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let providers = ALLOWED_EMAIL_PROVIDERS
        .iter()
        .map(|provider| regex::escape(provider))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^[a-zA-Z0-9._%+-]+@({})$", providers))
        .expect("email pattern is valid")
});

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern is valid"));

/// Validate a contact submitted for create or update
///
/// Returns every problem found; an empty list means the contact is valid.
pub fn validate_contact(contact: &Contact) -> Vec<FieldError> {
    [
        validate_phone(&contact.phone),
        validate_email(&contact.email),
        validate_name(&contact.name),
        validate_key(contact.key),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn validate_phone(phone: &str) -> Option<FieldError> {
    (!PHONE_RE.is_match(phone)).then(|| {
        FieldError::new(
            fields::PHONE,
            "Phone must be exactly 10 digits with no letters",
        )
    })
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    (!EMAIL_RE.is_match(email)).then(|| {
        FieldError::new(
            fields::EMAIL,
            format!(
                "Email must use a known provider ({})",
                ALLOWED_EMAIL_PROVIDERS.join(", ")
            ),
        )
    })
}

pub fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() || !NAME_RE.is_match(name) {
        Some(FieldError::new(
            fields::NAME,
            "Name must not be empty or contain digits or symbols",
        ))
    } else {
        None
    }
}

pub fn validate_key(key: i64) -> Option<FieldError> {
    (key <= 0).then(|| FieldError::key("Key must be a number greater than 0"))
}

/// Validate search parameters; only a provided key is checked
pub fn validate_search(criteria: &SearchCriteria) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(key) = criteria.key_filter() {
        if !NUMERIC_RE.is_match(key) {
            errors.push(FieldError::key("Key must be numeric"));
        }
    }
    errors
}
