use crate::error::AnalysisError;
use crate::prediction_client::interface::{interpret_response, Classification, Prediction};

#[test]
fn test_parse_recognizes_both_positive_spellings() {
    let modern = Prediction::parse(r#"{"prediction":"fire","confidence":0.95}"#).unwrap();
    let legacy = Prediction::parse(r#"{"prediction":"FOREST FIRE DETECTED"}"#).unwrap();

    assert!(modern.is_fire());
    assert!(legacy.is_fire());
    assert_eq!(legacy.confidence, None);
    assert_eq!(legacy.model, None);
}

#[test]
fn test_parse_negative_without_model() {
    let prediction = Prediction::parse(r#"{"prediction":"no_fire","confidence":0.2}"#).unwrap();

    assert_eq!(prediction.prediction, Classification::NoFire);
    assert!(!prediction.is_fire());
}

#[test]
fn test_parse_rejects_unknown_shapes() {
    for body in [
        r#"{"prediction":"Fire"}"#,
        r#"{"confidence":0.5}"#,
        r#"{"prediction":"fire","confidence":1.5}"#,
        r#"{"prediction":"no_fire","confidence":"high"}"#,
        "<html>not json</html>",
    ] {
        assert!(
            matches!(
                Prediction::parse(body),
                Err(AnalysisError::MalformedResponse(_))
            ),
            "expected malformed: {}",
            body
        );
    }
}

#[test]
fn test_interpret_non_success_status() {
    assert_eq!(
        interpret_response(404, "Not Found"),
        Err(AnalysisError::Status {
            status: 404,
            message: None,
        })
    );
    assert_eq!(
        interpret_response(400, r#"{"error":"Empty filename"}"#)
            .unwrap_err()
            .to_string(),
        "Server error: 400 (Empty filename)"
    );
}
