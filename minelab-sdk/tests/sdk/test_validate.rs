//! Tests for input validation

use minelab_sdk::validate::*;
use minelab_sdk::{AnalysisKind, FileHandle, RequestBody, RequestPayload};
use serde_json::json;

fn correlation(first: &str, second: &str) -> RawInput {
    RawInput::Correlation(CorrelationForm {
        first: first.into(),
        second: second.into(),
    })
}

// ============================================================================
// Numeric sequences
// ============================================================================

#[test]
fn test_correlation_scenario_values() {
    let payload = validate(&correlation("175, 133, 185", "65, 67, 71")).unwrap();
    let RequestPayload::Correlation(p) = &payload else {
        panic!("expected correlation payload");
    };
    assert_eq!(p.first(), &[175.0, 133.0, 185.0]);
    assert_eq!(p.second(), Some(&[65.0, 67.0, 71.0][..]));
    assert_eq!(
        payload.body(),
        RequestBody::Json(json!({"a": [175.0, 133.0, 185.0], "b": [65.0, 67.0, 71.0]}))
    );
}

#[test]
fn test_exactly_two_numbers_is_accepted() {
    assert!(validate(&correlation("1, 2", "")).is_ok());
    assert!(validate(&correlation("1, abc, 2", "3,4")).is_ok());
}

#[test]
fn test_fewer_than_two_numbers_is_rejected() {
    for text in ["", "7", "7, x, y", "abc"] {
        let failure = validate(&correlation(text, "")).unwrap_err();
        assert!(failure.mentions("at least 2"), "input {:?}", text);
    }
}

#[test]
fn test_second_sequence_checked_separately() {
    let failure = validate(&correlation("1, 2, 3", "4")).unwrap_err();
    assert_eq!(failure.reasons().len(), 1);
    assert!(failure.reasons()[0].starts_with("second sequence"));
}

#[test]
fn test_length_mismatch_is_named() {
    let failure = validate(&correlation("1, 2, 3", "4, 5")).unwrap_err();
    assert!(failure.mentions("same length"));
}

#[test]
fn test_validation_is_deterministic() {
    let input = correlation("1, 2, x", "3, 4");
    assert_eq!(validate(&input), validate(&input));
    let bad = correlation("1", "");
    assert_eq!(validate(&bad), validate(&bad));
}

// ============================================================================
// Categorical selections
// ============================================================================

#[test]
fn test_prediction_requires_every_field() {
    let form = NaiveBayesForm {
        outlook: "Sunny".into(),
        temperature: "".into(),
        humidity: "High".into(),
        wind: " ".into(),
        ..Default::default()
    };
    let failure = validate(&RawInput::NaiveBayes(form)).unwrap_err();
    assert_eq!(failure.reasons().len(), 1);
    assert!(failure.mentions("select a value for every field"));
    assert!(failure.mentions("Temperature, Wind"));
}

#[test]
fn test_prediction_rejects_values_outside_enumeration() {
    let form = NaiveBayesForm {
        outlook: "Foggy".into(),
        temperature: "Mild".into(),
        humidity: "Normal".into(),
        wind: "Gale".into(),
        ..Default::default()
    };
    let failure = validate(&RawInput::NaiveBayes(form)).unwrap_err();
    assert_eq!(
        failure.reasons(),
        &["'Foggy' is not a valid Outlook", "'Gale' is not a valid Wind"]
    );
}

#[test]
fn test_prediction_payload() {
    let form = NaiveBayesForm {
        outlook: "rainy".into(),
        temperature: "Cool".into(),
        humidity: "Normal".into(),
        wind: "Weak".into(),
        ..Default::default()
    };
    let payload = validate(&RawInput::NaiveBayes(form)).unwrap();
    assert_eq!(payload.kind(), AnalysisKind::NaiveBayesPredict);
    let RequestBody::Json(body) = payload.body() else {
        panic!("predict is JSON");
    };
    assert_eq!(
        body,
        json!({"Outlook": "Rainy", "Temperature": "Cool", "Humidity": "Normal", "Wind": "Weak"})
    );
}

// ============================================================================
// File based inputs
// ============================================================================

fn file_inputs(file: Option<FileHandle>) -> Vec<RawInput> {
    vec![
        RawInput::NaiveBayes(NaiveBayesForm {
            mode: BayesMode::Bulk,
            file: file.clone(),
            ..Default::default()
        }),
        RawInput::Cluster(ClusterForm {
            file: file.clone(),
            ..Default::default()
        }),
        RawInput::Classification(ClassificationForm { file: file.clone() }),
        RawInput::Association(AssociationForm {
            file: file.clone(),
            ..Default::default()
        }),
        RawInput::RoughSet(RoughSetForm {
            file,
            decision_attribute: "Flu".into(),
            condition_attributes: "Headache".into(),
            concept: String::new(),
        }),
    ]
}

#[test]
fn test_missing_file_on_every_file_screen() {
    for input in file_inputs(None) {
        let failure = validate(&input).unwrap_err();
        assert!(failure.mentions(SELECT_A_FILE), "{:?}", input.kind());
    }
}

#[test]
fn test_wrong_extension_on_every_file_screen() {
    for input in file_inputs(Some(FileHandle::new("/tmp/notes.txt"))) {
        let failure = validate(&input).unwrap_err();
        assert!(failure.mentions("not an accepted file type"), "{:?}", input.kind());
    }
}

#[test]
fn test_extension_check_ignores_case() {
    for input in file_inputs(Some(FileHandle::new("/tmp/DATA.XLSX"))) {
        let payload = validate(&input).unwrap();
        assert_eq!(payload.kind(), input.kind());
        assert!(payload.attachment().is_some());
    }
}

#[test]
fn test_cluster_count_outside_options() {
    let form = ClusterForm {
        file: Some(FileHandle::new("a.xlsx")),
        n_clusters: 7,
    };
    let failure = validate(&RawInput::Cluster(form)).unwrap_err();
    assert_eq!(failure.reasons(), &["number of clusters must be one of 2, 3, 4, 5"]);
}

#[test]
fn test_cluster_payload_stringifies_count() {
    let form = ClusterForm {
        file: Some(FileHandle::new("a.xlsx")),
        n_clusters: 4,
    };
    let body = validate(&RawInput::Cluster(form)).unwrap().body();
    let RequestBody::Multipart { file, fields } = body else {
        panic!("cluster is multipart");
    };
    assert_eq!(file.name(), "a.xlsx");
    assert_eq!(fields, vec![("n_clusters", "4".to_string())]);
}

#[test]
fn test_thresholds_outside_options() {
    let form = AssociationForm {
        file: None,
        min_support: 0.25,
        min_confidence: 0.9,
    };
    let failure = validate(&RawInput::Association(form)).unwrap_err();
    assert_eq!(failure.reasons().len(), 3);
    assert_eq!(failure.reasons()[0], SELECT_A_FILE);
    assert!(failure.reasons()[1].starts_with("minimum support"));
    assert!(failure.reasons()[2].starts_with("minimum confidence"));
}

#[test]
fn test_rough_set_concept_is_sent_when_given() {
    let form = RoughSetForm {
        file: Some(FileHandle::new("flu.csv")),
        decision_attribute: " Flu ".into(),
        condition_attributes: "Headache,Muscle pain".into(),
        concept: "Yes".into(),
    };
    let body = validate(&RawInput::RoughSet(form)).unwrap().body();
    let RequestBody::Multipart { fields, .. } = body else {
        panic!("rough set is multipart");
    };
    assert_eq!(
        fields,
        vec![
            ("decision_attribute", "Flu".to_string()),
            ("condition_attributes", "Headache,Muscle pain".to_string()),
            ("X", "Yes".to_string()),
        ]
    );
}

#[test]
fn test_rough_set_requires_attributes() {
    let form = RoughSetForm {
        file: Some(FileHandle::new("flu.xlsx")),
        decision_attribute: "".into(),
        condition_attributes: " , ".into(),
        concept: String::new(),
    };
    let failure = validate(&RawInput::RoughSet(form)).unwrap_err();
    assert_eq!(failure.reasons().len(), 2);
}
