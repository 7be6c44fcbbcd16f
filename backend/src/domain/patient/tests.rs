//! Tests for patient validation and patch merging.

use super::*;
use crate::domain::{Error, ErrorCode};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn draft() -> PatientDraft {
    PatientDraft {
        id: "P001".to_owned(),
        name: "A".to_owned(),
        city: "X".to_owned(),
        age: 30,
        gender: "male".to_owned(),
        height: 1.75,
        weight: 70.0,
    }
}

#[fixture]
fn patient(draft: PatientDraft) -> Patient {
    draft.validate().expect("fixture draft is valid")
}

#[rstest]
fn valid_draft_derives_metrics(patient: Patient) {
    assert_eq!(patient.id().as_str(), "P001");
    assert_eq!(patient.gender(), Gender::Male);
    assert_eq!(patient.metrics().bmi(), 22.86);
    assert_eq!(patient.metrics().verdict(), Verdict::Normal);
}

#[rstest]
#[case::blank_id(|d: &mut PatientDraft| d.id = "  ".to_owned(), "id", "empty_value")]
#[case::padded_id(|d: &mut PatientDraft| d.id = "P001 ".to_owned(), "id", "surrounding_whitespace")]
#[case::blank_name(|d: &mut PatientDraft| d.name = String::new(), "name", "empty_value")]
#[case::blank_city(|d: &mut PatientDraft| d.city = " ".to_owned(), "city", "empty_value")]
#[case::negative_age(|d: &mut PatientDraft| d.age = -1, "age", "out_of_range")]
#[case::age_at_limit(|d: &mut PatientDraft| d.age = 120, "age", "out_of_range")]
#[case::unknown_gender(|d: &mut PatientDraft| d.gender = "unknown".to_owned(), "gender", "unknown_literal")]
#[case::zero_height(|d: &mut PatientDraft| d.height = 0.0, "height", "not_positive")]
#[case::infinite_height(|d: &mut PatientDraft| d.height = f64::INFINITY, "height", "not_positive")]
#[case::negative_weight(|d: &mut PatientDraft| d.weight = -5.0, "weight", "not_positive")]
fn invalid_drafts_name_the_offending_field(
    mut draft: PatientDraft,
    #[case] mutate: fn(&mut PatientDraft),
    #[case] field: &str,
    #[case] code: &str,
) {
    mutate(&mut draft);
    let err = draft.validate().expect_err("draft should be rejected");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), code);
}

#[rstest]
#[case(0)]
#[case(119)]
fn age_bounds_are_inclusive_of_zero_and_exclusive_of_limit(mut draft: PatientDraft, #[case] age: i64) {
    draft.age = age;
    assert!(draft.validate().is_ok());
}

#[rstest]
#[case("female", Gender::Female)]
#[case("other", Gender::Other)]
#[case("Other", Gender::Other)]
fn gender_literals_parse(#[case] raw: &str, #[case] expected: Gender) {
    assert_eq!(raw.parse::<Gender>().expect("known literal"), expected);
}

#[rstest]
fn gender_is_case_sensitive_for_male() {
    assert!("Male".parse::<Gender>().is_err());
}

#[rstest]
fn patch_leaves_unset_fields_unchanged(patient: Patient) {
    let patch = PatientPatch {
        city: Patch::Set("Y".to_owned()),
        ..PatientPatch::default()
    };

    let updated = patient.apply(patch).expect("valid patch");
    assert_eq!(updated.city(), "Y");
    assert_eq!(updated.name(), patient.name());
    assert_eq!(updated.age(), patient.age());
    assert_eq!(updated.metrics(), patient.metrics());
}

#[rstest]
fn patch_recomputes_metrics_when_weight_changes(patient: Patient) {
    let patch = PatientPatch {
        weight: Patch::Set(100.0),
        ..PatientPatch::default()
    };
    assert!(patch.changes_measurements());

    let updated = patient.apply(patch).expect("valid patch");
    assert_eq!(updated.metrics().bmi(), 32.65);
    assert_eq!(updated.metrics().verdict(), Verdict::Overweight);
}

#[rstest]
fn patch_validation_only_checks_set_fields() {
    let patch = PatientPatch {
        name: Patch::Set("B".to_owned()),
        ..PatientPatch::default()
    };
    assert!(patch.validate().is_ok());
}

#[rstest]
fn merged_record_is_fully_revalidated(patient: Patient) {
    let patch = PatientPatch {
        height: Patch::Set(-1.0),
        ..PatientPatch::default()
    };
    let err = patient.apply(patch).expect_err("merged record is invalid");
    assert_eq!(err, PatientValidationError::NonPositiveHeight { value: -1.0 });
}

#[rstest]
fn validation_errors_map_to_invalid_request_with_details() {
    let error = Error::from(PatientValidationError::AgeOutOfRange { value: 150 });
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "age", "code": "out_of_range", "value": 150 }))
    );
}

#[rstest]
fn collection_lookups_accept_str_keys(patient: Patient) {
    let mut collection = PatientCollection::new();
    collection.insert(patient.id().clone(), patient);
    assert!(collection.contains_key("P001"));
}
