//! Tests for CSV source reading and writing

use super::*;
use crate::ErrorKind;
use crate::app::models::Contact;
use crate::app::services::row_parser::{RowParser, read_rows, write_contacts};
use tempfile::TempDir;

#[test]
fn test_read_rows_keeps_ragged_rows() {
    let file = create_temp_file("key,name,email,phone\n1,Ana,ana@x.com,5551234567\n2,Bob\n");

    let rows = read_rows(file.path()).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].len(), 4);
    assert_eq!(rows[2], cells(&["2", "Bob"]));
}

#[test]
fn test_read_rows_handles_quoted_fields() {
    let file = create_temp_file("key,name,email,phone\n1,\"Pérez, Ana\",ana@x.com,5551234567\n");

    let rows = read_rows(file.path()).unwrap();
    assert_eq!(rows[1][1], "Pérez, Ana");
}

#[test]
fn test_read_rows_missing_file() {
    let dir = TempDir::new().unwrap();
    let error = read_rows(&dir.path().join("missing.csv")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn test_read_rows_empty_file() {
    let file = create_temp_file("");
    let error = read_rows(file.path()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Format);
    assert!(error.to_string().contains("no rows"));
}

#[test]
fn test_read_rows_replaces_invalid_utf8() {
    let mut content = b"key,name,email,phone\n1,".to_vec();
    content.extend_from_slice(&[0xff, 0xfe]);
    content.extend_from_slice(b",a@x.com,5551234567\n");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bytes.csv");
    std::fs::write(&path, content).unwrap();

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[1][1].contains('\u{FFFD}'));
}

#[test]
fn test_write_then_parse_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    let contacts = vec![
        Contact::new(2, "Bob, Jr.", "bob@x.com", "0551234567"),
        Contact::new(1, "Ana", "ana@x.com", "5551234567"),
    ];

    write_contacts(&path, &contacts).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("key,name,email,phone\n"));

    let outcome = RowParser::parse_all(&read_rows(&path).unwrap());
    assert_eq!(outcome.contacts, contacts);
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("contacts.csv");

    let error = write_contacts(&path, &[]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn test_parse_fixture_file() {
    let file = create_temp_file(mixed_csv());
    let outcome = RowParser::parse_all(&read_rows(file.path()).unwrap());

    assert_eq!(outcome.contacts.len(), 1);
    assert_eq!(outcome.invalid_rows.len(), 2);
}
