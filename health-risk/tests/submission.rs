//! Integration tests for the submission flow

use health_risk::{
    Field, HealthProfile, HealthRiskForm, SUBMISSION_FAILED_MESSAGE, ScriptedPredictor,
    SubmissionStatus,
};
use pretty_assertions::assert_eq;

#[test]
fn default_profile_submits_exactly_once() {
    let predictor = ScriptedPredictor::new().with_success(&[("Heart_Disease", "12.5")]);
    let mut form = HealthRiskForm::new();

    let status = form.submit(&predictor).clone();

    assert_eq!(predictor.calls(), 1);
    let SubmissionStatus::Succeeded(prediction) = status else {
        panic!("expected success, got {status:?}");
    };
    assert_eq!(
        prediction.display_rows(),
        vec![("Heart Disease".to_string(), "12.5%".to_string())]
    );
}

#[test]
fn request_body_carries_every_field_and_null_condition() {
    let predictor = ScriptedPredictor::new().with_success(&[("liver", "1")]);
    let mut form = HealthRiskForm::new();
    form.submit(&predictor);

    let requests = predictor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].profile(), &HealthProfile::default());

    let body: serde_json::Value = serde_json::from_str(&requests[0].to_json().unwrap()).unwrap();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), Field::ALL.len());
    for field in Field::ALL {
        assert!(object.contains_key(field.name()), "missing {field}");
    }
    assert!(object["ExistingConditions"].is_null());
    assert_eq!(object["Age"], 30);
    assert_eq!(object["BMI"], 24.5);
    assert_eq!(object["ActivityLevel"], "moderate");
}

#[test]
fn invalid_profile_makes_no_request() {
    let predictor = ScriptedPredictor::new().with_success(&[("liver", "1")]);
    let mut form = HealthRiskForm::new();
    form.set_input(Field::FastingGlucose, "20").unwrap();
    form.set_input(Field::Gender, "").unwrap();

    let status = form.submit(&predictor).clone();

    assert_eq!(predictor.calls(), 0);
    let SubmissionStatus::Invalid(errors) = status else {
        panic!("expected invalid, got {status:?}");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec![Field::Gender, Field::FastingGlucose]
    );
}

#[test]
fn error_status_gives_generic_failure_regardless_of_body() {
    let bodies = [
        "",
        "Internal Server Error",
        r#"{"predicted_risks_percent": {"Heart_Disease": "12.5"}}"#,
        r#"{"detail": [{"loc": ["body", "Gender"], "msg": "field required"}]}"#,
    ];
    for body in bodies {
        let predictor = ScriptedPredictor::new().with_response(422, body);
        let mut form = HealthRiskForm::new();

        assert_eq!(
            form.submit(&predictor),
            &SubmissionStatus::Failed(SUBMISSION_FAILED_MESSAGE.to_string()),
            "body {body:?}"
        );
    }
}

#[test]
fn transport_and_parse_failures_collapse_to_same_message() {
    let predictor = ScriptedPredictor::new()
        .with_transport_failure("connection refused")
        .with_response(200, "{not json")
        .with_response(200, r#"{"error": "boom"}"#);
    let mut form = HealthRiskForm::new();

    for _ in 0..3 {
        assert_eq!(form.submit(&predictor).name(), "failed");
        assert_eq!(form.failure(), Some(SUBMISSION_FAILED_MESSAGE));
    }
    assert_eq!(predictor.calls(), 3);
}

#[test]
fn resubmitting_after_failure_replaces_it_with_result() {
    let predictor = ScriptedPredictor::new()
        .with_response(503, "unavailable")
        .with_success(&[("metabolic", "33.3"), ("liver", "2.1")]);
    let mut form = HealthRiskForm::new();

    form.submit(&predictor);
    assert!(form.failure().is_some());

    form.submit(&predictor);
    assert_eq!(form.failure(), None);
    let result = form.result().unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.get("metabolic").unwrap().display_value(), "33.3%");
}

#[test]
fn fixing_errors_then_resubmitting_succeeds() {
    let predictor = ScriptedPredictor::new().with_success(&[("respiratory", "7")]);
    let mut form = HealthRiskForm::new();
    form.set_input(Field::BpSystolic, "260").unwrap();
    form.set_input(Field::BpDiastolic, "30").unwrap();

    form.submit(&predictor);
    assert_eq!(form.errors().map(|e| e.len()), Some(2));

    form.set_input(Field::BpSystolic, "130").unwrap();
    assert_eq!(form.error_for(Field::BpSystolic), None);
    assert!(form.error_for(Field::BpDiastolic).is_some());

    form.set_input(Field::BpDiastolic, "85").unwrap();
    assert_eq!(form.status(), &SubmissionStatus::Idle);

    form.submit(&predictor);
    assert!(form.result().is_some());
    assert_eq!(predictor.requests()[0].profile().bp_systolic, 130);
}
