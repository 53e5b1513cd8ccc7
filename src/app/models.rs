//! Data models for the contact store
//!
//! This module contains the contact record, the raw-row and row-error
//! structures captured while loading the CSV source, the search criteria
//! accepted by the store, and the request-validation error type.

use crate::constants::fields;
use serde::{Deserialize, Serialize};

pub mod report;

pub use report::{
    CommonError, ContactStats, DomainStats, FieldStats, IndexStats, LoadStatus, PaginatedResult,
    ReportSummary, ValidationReport,
};

// =============================================================================
// Contact Record
// =============================================================================

/// A validated contact held in the store
///
/// Field rules enforced at load time: `key` is a positive integer unique in
/// the store, `name` and `email` are non-empty, `email` contains `@`, and
/// `phone` is exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Contact {
    /// Unique positive identifier
    pub key: i64,

    pub name: String,

    pub email: String,

    /// Ten-digit phone number, stored as text to keep leading zeros
    pub phone: String,
}

impl Contact {
    pub fn new(
        key: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Cells written to the CSV source, in column order
    pub fn to_row(&self) -> [String; 4] {
        [
            self.key.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
        ]
    }

    /// Domain part of the email address, lower-cased
    pub fn email_domain(&self) -> Option<String> {
        let (local, domain) = self.email.split_once('@')?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return None;
        }
        Some(domain.to_lowercase())
    }
}

// =============================================================================
// Load Diagnostics
// =============================================================================

/// Raw capture of one source row, kept so rejected rows can be corrected
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRowSnapshot {
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// True when at least one validation check failed for this row
    pub has_errors: bool,

    /// Number of validation failures recorded for this row
    pub error_count: usize,

    /// Messages formatted as `"<field>: <message>"`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl RawRowSnapshot {
    /// Build a snapshot from trimmed cell values, missing cells left empty
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        Self {
            key: cell(0),
            name: cell(1),
            email: cell(2),
            phone: cell(3),
            ..Default::default()
        }
    }

    /// Record one validation failure against this row
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.has_errors = true;
        self.error_count += 1;
        self.errors.push(format!("{}: {}", field, message));
    }

    /// Split stored messages back into `(field, message)` pairs
    pub fn field_messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|entry| entry.split_once(": ").unwrap_or(("", entry.as_str())))
    }
}

/// Machine-checkable category of a row error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// Row has fewer than the required columns
    Structure,
    EmptyField,
    InvalidInteger,
    NonPositiveKey,
    DuplicateKey,
    PhoneLength,
    PhoneNonNumeric,
    EmailMissingAt,
}

impl RowErrorKind {
    /// Stable name used in report groupings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::EmptyField => "empty_field",
            Self::InvalidInteger => "invalid_integer",
            Self::NonPositiveKey => "non_positive_key",
            Self::DuplicateKey => "duplicate_key",
            Self::PhoneLength => "phone_length",
            Self::PhoneNonNumeric => "phone_non_numeric",
            Self::EmailMissingAt => "email_missing_at",
        }
    }
}

impl std::fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation failure tied to a source row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// Data row number, 1-based, header excluded
    pub row: usize,

    /// Column letter (`A`-`D`) or `general` for structural errors
    pub column: String,

    pub field: String,

    pub kind: RowErrorKind,

    /// Offending raw value (trimmed)
    pub value: String,

    /// Human-readable description
    pub message: String,

    /// Final snapshot of the row this error belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_data: Option<RawRowSnapshot>,
}

/// Diagnostics produced by a load pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub errors: Vec<RowError>,
    pub invalid_rows: Vec<RawRowSnapshot>,
}

// =============================================================================
// Search Criteria
// =============================================================================

/// Optional search filters, combined with AND
///
/// Unset and empty values are ignored. `key` is matched exactly after
/// integer parsing; a non-numeric key matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Case-insensitive substring of the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Case-insensitive substring of the email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Substring of the phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SearchCriteria {
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    pub fn key_filter(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    pub fn name_filter(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn email_filter(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn phone_filter(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.key_filter().is_none()
            && self.name_filter().is_none()
            && self.email_filter().is_none()
            && self.phone_filter().is_none()
    }

    /// Canonical cache key; criteria producing the same matches map to the same key
    ///
    /// Each part is length-prefixed, so filter values containing the
    /// separators cannot make two different criteria collide.
    pub fn cache_key(&self) -> String {
        let parts = [
            self.key_filter().unwrap_or_default().to_string(),
            self.name_filter().unwrap_or_default().to_lowercase(),
            self.email_filter().unwrap_or_default().to_lowercase(),
            self.phone_filter().unwrap_or_default().to_string(),
        ];
        parts
            .iter()
            .map(|part| format!("{}:{}", part.len(), part))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Check a contact against every set filter
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(key) = self.key_filter() {
            match key.parse::<i64>() {
                Ok(key) if key == contact.key => {}
                _ => return false,
            }
        }

        if let Some(name) = self.name_filter() {
            if !contact.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if let Some(email) = self.email_filter() {
            if !contact.email.to_lowercase().contains(&email.to_lowercase()) {
                return false;
            }
        }

        if let Some(phone) = self.phone_filter() {
            if !contact.phone.contains(phone) {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// Request Validation
// =============================================================================

/// Contact body accepted by create and update requests
///
/// Every field is optional on the wire so that missing values surface as
/// field errors instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub key: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactPayload {
    /// Build a contact, trimming text fields; `key` overrides the body key
    pub fn into_contact(self, key: Option<i64>) -> Contact {
        Contact {
            key: key.or(self.key).unwrap_or_default(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

impl From<Contact> for ContactPayload {
    fn from(contact: Contact) -> Self {
        Self {
            key: Some(contact.key),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// A field-level problem with API input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn key(message: impl Into<String>) -> Self {
        Self::new(fields::KEY, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Contact {
        Contact::new(1, "Ana María", "Ana@Gmail.com", "5551234567")
    }

    #[test]
    fn test_contact_row_and_domain() {
        let contact = ana();
        assert_eq!(
            contact.to_row(),
            [
                "1".to_string(),
                "Ana María".to_string(),
                "Ana@Gmail.com".to_string(),
                "5551234567".to_string()
            ]
        );
        assert_eq!(contact.email_domain(), Some("gmail.com".to_string()));

        let broken = Contact::new(2, "Bob", "bob@", "5551234567");
        assert_eq!(broken.email_domain(), None);
    }

    #[test]
    fn test_snapshot_from_partial_cells() {
        let snapshot = RawRowSnapshot::from_cells(&["7".to_string(), "Eve".to_string()]);
        assert_eq!(snapshot.key, "7");
        assert_eq!(snapshot.name, "Eve");
        assert_eq!(snapshot.email, "");
        assert_eq!(snapshot.phone, "");
        assert!(!snapshot.has_errors);
    }

    #[test]
    fn test_snapshot_error_messages_round_trip() {
        let mut snapshot = RawRowSnapshot::default();
        snapshot.add_error("phone", "must have exactly 10 digits");
        snapshot.add_error("email", "must contain @");

        assert!(snapshot.has_errors);
        assert_eq!(snapshot.error_count, 2);
        let pairs: Vec<_> = snapshot.field_messages().collect();
        assert_eq!(
            pairs,
            vec![
                ("phone", "must have exactly 10 digits"),
                ("email", "must contain @")
            ]
        );
    }

    #[test]
    fn test_criteria_matching() {
        let contact = ana();

        assert!(SearchCriteria::default().matches(&contact));
        assert!(SearchCriteria::by_key("1").matches(&contact));
        assert!(!SearchCriteria::by_key("2").matches(&contact));
        assert!(!SearchCriteria::by_key("one").matches(&contact));
        assert!(SearchCriteria::by_name("maría").matches(&contact));
        assert!(SearchCriteria::by_email("GMAIL").matches(&contact));
        assert!(SearchCriteria::by_phone("1234").matches(&contact));
        assert!(!SearchCriteria::by_phone("9999").matches(&contact));

        let combined = SearchCriteria {
            name: Some("ana".to_string()),
            phone: Some("0000".to_string()),
            ..Default::default()
        };
        assert!(!combined.matches(&contact));
    }

    #[test]
    fn test_criteria_empty_values_ignored() {
        let criteria = SearchCriteria {
            key: Some(String::new()),
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert!(criteria.matches(&ana()));
        assert_eq!(criteria.cache_key(), SearchCriteria::default().cache_key());
    }

    #[test]
    fn test_cache_key_is_case_canonical() {
        assert_eq!(
            SearchCriteria::by_name("ANA").cache_key(),
            SearchCriteria::by_name("ana").cache_key()
        );
        assert_ne!(
            SearchCriteria::by_name("ana").cache_key(),
            SearchCriteria::by_email("ana").cache_key()
        );
    }

    #[test]
    fn test_cache_key_separators_in_values() {
        let name_only = SearchCriteria::by_name("x|e:y");
        let name_and_email = SearchCriteria {
            name: Some("x".to_string()),
            email: Some("y|e:".to_string()),
            ..Default::default()
        };
        assert_ne!(name_only.cache_key(), name_and_email.cache_key());
    }

    #[test]
    fn test_payload_into_contact() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"key": 4, "name": " Ana ", "email": "a@gmail.com"}"#)
                .unwrap();
        assert_eq!(payload.phone, "");

        let contact = payload.clone().into_contact(None);
        assert_eq!(contact.key, 4);
        assert_eq!(contact.name, "Ana");

        // Path key wins over the body key
        assert_eq!(payload.into_contact(Some(9)).key, 9);
        assert_eq!(ContactPayload::default().into_contact(None).key, 0);
    }

    #[test]
    fn test_row_error_serializes_camel_case() {
        let error = RowError {
            row: 2,
            column: "D".to_string(),
            field: "phone".to_string(),
            kind: RowErrorKind::PhoneLength,
            value: "123".to_string(),
            message: "must have exactly 10 digits".to_string(),
            row_data: None,
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["kind"], "phone_length");
        assert_eq!(json["row"], 2);
        assert!(json.get("rowData").is_none());
    }
}
