//! Tests for contact service rules

use super::*;
use crate::ErrorKind;
use crate::app::models::SearchCriteria;

#[test]
fn test_create_valid_contact() {
    let (_dir, service) = service_with(SAMPLE);

    let created = service
        .create(payload(6, "Elena", "elena@outlook.com", "5556667777"))
        .unwrap();

    assert_eq!(created.key, 6);
    assert_eq!(service.count(), 6);
    assert_eq!(service.get(6).unwrap().name, "Elena");
}

#[test]
fn test_create_rejects_unknown_provider() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service
        .create(payload(6, "Elena", "elena@example.com", "5556667777"))
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.field_errors().len(), 1);
    assert_eq!(error.field_errors()[0].field, "email");
    assert_eq!(service.count(), 5);
}

#[test]
fn test_create_reports_every_field_error() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service.create(payload(0, "", "nope", "12")).unwrap_err();
    assert_eq!(error.field_errors().len(), 4);
}

#[test]
fn test_created_contact_survives_reload() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service
        .create(payload(6, "Elena", "elena@outlook.com", "١٢٣٤٥٦٧٨٩٠"))
        .unwrap_err();
    assert_eq!(error.field_errors()[0].field, "phone");

    service
        .create(payload(6, "Elena", "elena@outlook.com", "5556667777"))
        .unwrap();
    let report = service.reload().unwrap();
    assert_eq!(report.valid_rows, 6);
    assert!(report.is_clean());
}

#[test]
fn test_create_duplicate_is_conflict() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service
        .create(payload(1, "Other", "other@gmail.com", "5550000000"))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn test_update_uses_path_key() {
    let (_dir, service) = service_with(SAMPLE);

    let updated = service
        .update(2, payload(99, "Anabel Ruiz", "anabel@yahoo.com", "5559876543"))
        .unwrap();

    assert_eq!(updated.key, 2);
    assert_eq!(service.get(2).unwrap().name, "Anabel Ruiz");
    assert!(service.get(99).is_err());
}

#[test]
fn test_update_missing_is_not_found_before_validation() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service.update(42, payload(42, "", "", "")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn test_non_positive_keys_are_validation_errors() {
    let (_dir, service) = service_with(SAMPLE);

    assert_eq!(service.get(0).unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(service.delete(-3).unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(
        service
            .update(0, payload(0, "Ana", "ana@gmail.com", "5551234567"))
            .unwrap_err()
            .kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_delete() {
    let (_dir, service) = service_with(SAMPLE);

    assert_eq!(service.delete(3).unwrap().name, "Bruno");
    assert_eq!(service.delete(3).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.count(), 4);
}

#[test]
fn test_empty_search_returns_all() {
    let (_dir, service) = service_with(SAMPLE);

    assert_eq!(service.search(&SearchCriteria::default()).unwrap().len(), 5);
    // Empty strings count as unset
    let blank = SearchCriteria {
        name: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(service.search(&blank).unwrap().len(), 5);
}

#[test]
fn test_search_validates_key() {
    let (_dir, service) = service_with(SAMPLE);

    let error = service.search(&SearchCriteria::by_key("x1")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);

    assert_eq!(service.search(&SearchCriteria::by_name("an")).unwrap().len(), 2);
}

#[test]
fn test_invalid_rows_for_correction() {
    let (_dir, service) =
        service_with("1,Ana,ana@gmail.com,5551234567\n,Bob,bob@x.com,1\n1,Dup,d@x.com,5550000000\n");

    let rows = service.invalid_rows_for_correction();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Bob");
    assert_eq!(rows[0].error_count, 2);
    assert!(rows[1].errors[0].starts_with("key: "));
}

#[test]
fn test_reload_reports() {
    let (_dir, service) = service_with(SAMPLE);
    std::fs::write(
        service.store().source_path(),
        "key,name,email,phone\n1,Ana,ana@gmail.com,5551234567\n2,,b@x.com,5551234567\n",
    )
    .unwrap();

    let report = service.reload().unwrap();
    assert_eq!(report.valid_rows, 1);
    assert_eq!(report.invalid_rows, 1);
    assert_eq!(service.count(), 1);
    assert_eq!(service.load_errors().len(), 1);
    assert_eq!(service.validation_report().summary.errors_by_field["name"], 1);
}

#[test]
fn test_status_and_index_stats() {
    let (_dir, service) = service_with(SAMPLE);

    let status = service.status();
    assert!(status.is_loaded);
    assert_eq!(status.valid_records, 5);
    assert_eq!(service.index_stats().strategy, "linear");
}
