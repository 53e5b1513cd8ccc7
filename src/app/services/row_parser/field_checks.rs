//! Field validation checks for contact rows
//!
//! Each check inspects one trimmed cell and reports the problems it finds
//! as [`Violation`]s. Checks never fail the load; the row parser turns
//! violations into row errors.

use crate::app::models::RowErrorKind;
use crate::constants::{COLUMN_COUNT, PHONE_LENGTH, columns, fields};
use std::collections::HashSet;

/// A single failed check, not yet tied to a row number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub column: &'static str,
    pub field: &'static str,
    pub kind: RowErrorKind,
    pub message: String,
}

impl Violation {
    fn new(
        column: &'static str,
        field: &'static str,
        kind: RowErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column,
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Column letter and field name for each cell position
pub const FIELD_LAYOUT: [(&str, &str); COLUMN_COUNT] = [
    (columns::KEY, fields::KEY),
    (columns::NAME, fields::NAME),
    (columns::EMAIL, fields::EMAIL),
    (columns::PHONE, fields::PHONE),
];

/// Violation for a row with fewer than the required columns
pub fn structure_violation() -> Violation {
    Violation::new(
        columns::GENERAL,
        fields::STRUCTURE,
        RowErrorKind::Structure,
        "Row must contain exactly 4 columns: key, name, email, phone",
    )
}

/// Report an empty cell
pub fn check_not_empty(
    column: &'static str,
    field: &'static str,
    value: &str,
) -> Option<Violation> {
    if !value.is_empty() {
        return None;
    }

    let label = match field {
        fields::KEY => "Key",
        fields::NAME => "Name",
        fields::EMAIL => "Email",
        fields::PHONE => "Phone",
        other => other,
    };
    Some(Violation::new(
        column,
        field,
        RowErrorKind::EmptyField,
        format!("{} cannot be empty", label),
    ))
}

/// Validate a non-empty key cell against the keys accepted so far
///
/// Returns the parsed key when it is usable.
pub fn check_key(value: &str, accepted_keys: &HashSet<i64>) -> Result<i64, Violation> {
    let key = value.parse::<i64>().map_err(|_| {
        Violation::new(
            columns::KEY,
            fields::KEY,
            RowErrorKind::InvalidInteger,
            "Key must be a valid integer",
        )
    })?;

    if key <= 0 {
        return Err(Violation::new(
            columns::KEY,
            fields::KEY,
            RowErrorKind::NonPositiveKey,
            "Key must be a number greater than 0",
        ));
    }

    if accepted_keys.contains(&key) {
        return Err(Violation::new(
            columns::KEY,
            fields::KEY,
            RowErrorKind::DuplicateKey,
            format!("Key {} already exists in the file", key),
        ));
    }

    Ok(key)
}

/// Validate a non-empty phone cell; length and digit checks are independent
pub fn check_phone(value: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    if value.chars().count() != PHONE_LENGTH {
        violations.push(Violation::new(
            columns::PHONE,
            fields::PHONE,
            RowErrorKind::PhoneLength,
            format!("Phone must have exactly {} digits", PHONE_LENGTH),
        ));
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        violations.push(Violation::new(
            columns::PHONE,
            fields::PHONE,
            RowErrorKind::PhoneNonNumeric,
            "Phone must contain only digits",
        ));
    }

    violations
}

/// Validate a non-empty email cell
pub fn check_email(value: &str) -> Option<Violation> {
    if value.contains('@') {
        None
    } else {
        Some(Violation::new(
            columns::EMAIL,
            fields::EMAIL,
            RowErrorKind::EmailMissingAt,
            "Email must contain @",
        ))
    }
}
