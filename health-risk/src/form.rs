//! Form state and the submission state machine.
//!
//! ```text
//! Idle -> Validating -> Invalid
//!                    \-> Submitting -> Succeeded
//!                                   \-> Failed
//! ```
//!
//! Every terminal state accepts a new submit. While `Submitting`, further
//! submits are refused.

use health_risk_types::{
    Field, FieldValueError, HealthProfile, RiskPrediction, ValidationErrors,
};
use thiserror::Error;

use crate::{PredictionRequest, Predictor, validate};

/// The only failure text ever shown to the user for a submission.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to get prediction. Please try again.";

/// Where the form is in the submission flow, with the data that belongs to that step.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionStatus {
    /// Nothing submitted yet, or all validation errors were edited away.
    #[default]
    Idle,
    /// Validator is running. Only observable inside `begin_submit`.
    Validating,
    /// Validation failed; no request was made.
    Invalid(ValidationErrors),
    /// One request is in flight.
    Submitting,
    /// The service answered with these risks.
    Succeeded(RiskPrediction),
    /// The request failed; carries the user-facing message.
    Failed(String),
}

impl SubmissionStatus {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Invalid(_) => "invalid",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Reasons `begin_submit` did not produce a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A previous submission has not finished yet.
    #[error("A submission is already in progress")]
    InFlight,

    /// The profile failed validation; the errors are in the form status.
    #[error("{0} field(s) failed validation")]
    Invalid(usize),
}

/// Owns the profile being edited and the submission status.
///
/// One instance per form session. All mutation goes through the edit
/// methods and the submission methods below.
#[derive(Debug, Clone, Default)]
pub struct HealthRiskForm {
    profile: HealthProfile,
    status: SubmissionStatus,
}

impl HealthRiskForm {
    /// A form filled with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with `profile`.
    pub fn with_profile(profile: HealthProfile) -> Self {
        Self {
            profile,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    /// Active validation errors, if the last submit attempt was rejected.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match &self.status {
            SubmissionStatus::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// The validation message for one field.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors().and_then(|errors| errors.get(field))
    }

    /// The result of the last successful submission.
    pub fn result(&self) -> Option<&RiskPrediction> {
        match &self.status {
            SubmissionStatus::Succeeded(prediction) => Some(prediction),
            _ => None,
        }
    }

    /// The user-facing failure message of the last submission.
    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Set a field from user input and clear that field's validation error.
    pub fn set_input(&mut self, field: Field, input: &str) -> Result<(), FieldValueError> {
        self.profile.set_input(field, input)?;
        self.clear_error(field);
        Ok(())
    }

    /// Apply a typed edit to one field and clear that field's validation error.
    pub fn edit(&mut self, field: Field, apply: impl FnOnce(&mut HealthProfile)) {
        apply(&mut self.profile);
        self.clear_error(field);
    }

    fn clear_error(&mut self, field: Field) {
        let SubmissionStatus::Invalid(errors) = &mut self.status else {
            return;
        };
        if errors.remove(field).is_some() {
            tracing::debug!(field = field.name(), "cleared validation error");
        }
        if errors.is_empty() {
            self.transition(SubmissionStatus::Idle);
        }
    }

    /// Validate and, if valid, move to `Submitting` and hand back the request to send.
    ///
    /// On `Err(SubmitError::Invalid(_))` the per-field errors are available
    /// through [`Self::errors`]. No request may be sent in that case.
    pub fn begin_submit(&mut self) -> Result<PredictionRequest, SubmitError> {
        if self.is_submitting() {
            tracing::debug!("submit ignored, request already in flight");
            return Err(SubmitError::InFlight);
        }

        self.transition(SubmissionStatus::Validating);
        let errors = validate(&self.profile);
        if !errors.is_empty() {
            let count = errors.len();
            tracing::info!(count, "profile failed validation");
            self.transition(SubmissionStatus::Invalid(errors));
            return Err(SubmitError::Invalid(count));
        }

        self.transition(SubmissionStatus::Submitting);
        Ok(PredictionRequest::new(self.profile.clone()))
    }

    /// Record the outcome of the request started by [`Self::begin_submit`].
    ///
    /// The error detail is logged and then dropped; the user only ever sees
    /// [`SUBMISSION_FAILED_MESSAGE`].
    pub fn finish_submit(&mut self, outcome: Result<RiskPrediction, anyhow::Error>) {
        if !self.is_submitting() {
            tracing::warn!(
                status = self.status.name(),
                "submission outcome arrived while not submitting, ignoring"
            );
            return;
        }

        match outcome {
            Ok(prediction) => {
                tracing::info!(risks = prediction.len(), "prediction received");
                self.transition(SubmissionStatus::Succeeded(prediction));
            }
            Err(err) => {
                tracing::error!("prediction request failed: {err:#}");
                self.transition(SubmissionStatus::Failed(
                    SUBMISSION_FAILED_MESSAGE.to_string(),
                ));
            }
        }
    }

    /// Run a whole submission synchronously against `predictor`.
    ///
    /// Makes at most one call to the predictor.
    pub fn submit<P: Predictor>(&mut self, predictor: &P) -> &SubmissionStatus {
        if let Ok(request) = self.begin_submit() {
            let outcome = predictor.predict(&request).map_err(Into::into);
            self.finish_submit(outcome);
        }
        &self.status
    }

    fn transition(&mut self, next: SubmissionStatus) {
        tracing::debug!(from = self.status.name(), to = next.name(), "status change");
        self.status = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk_types::RiskScore;

    #[test]
    fn new_form_is_idle_with_defaults() {
        let form = HealthRiskForm::new();
        assert_eq!(form.status(), &SubmissionStatus::Idle);
        assert_eq!(form.profile(), &HealthProfile::default());
        assert!(form.errors().is_none());
    }

    #[test]
    fn invalid_profile_never_produces_a_request() {
        let mut form = HealthRiskForm::new();
        form.set_input(Field::Age, "0").unwrap();
        form.set_input(Field::SleepHours, "0").unwrap();

        assert_eq!(form.begin_submit(), Err(SubmitError::Invalid(2)));
        assert_eq!(form.error_for(Field::Age), Some("Age must be at least 1"));
        assert_eq!(
            form.error_for(Field::SleepHours),
            Some("Sleep hours must be between 1 and 24")
        );
        assert_eq!(form.status().name(), "invalid");
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let mut form = HealthRiskForm::new();
        form.set_input(Field::Age, "0").unwrap();
        form.set_input(Field::Cholesterol, "50").unwrap();
        let _ = form.begin_submit();

        form.set_input(Field::Age, "31").unwrap();
        assert_eq!(form.error_for(Field::Age), None);
        assert_eq!(
            form.error_for(Field::Cholesterol),
            Some("Cholesterol must be between 100 and 500")
        );
    }

    #[test]
    fn editing_clears_even_if_still_invalid() {
        let mut form = HealthRiskForm::new();
        form.set_input(Field::Age, "0").unwrap();
        form.set_input(Field::BpDiastolic, "10").unwrap();
        let _ = form.begin_submit();

        // Still out of range, but the error stays hidden until the next submit.
        form.set_input(Field::Age, "-3").unwrap();
        assert_eq!(form.error_for(Field::Age), None);
        assert!(form.error_for(Field::BpDiastolic).is_some());

        assert_eq!(form.begin_submit(), Err(SubmitError::Invalid(2)));
        assert!(form.error_for(Field::Age).is_some());
    }

    #[test]
    fn clearing_last_error_returns_to_idle() {
        let mut form = HealthRiskForm::new();
        form.edit(Field::Gender, |p| p.gender = None);
        let _ = form.begin_submit();
        assert!(form.errors().is_some());

        form.set_input(Field::Gender, "female").unwrap();
        assert_eq!(form.status(), &SubmissionStatus::Idle);
    }

    #[test]
    fn valid_profile_moves_to_submitting() {
        let mut form = HealthRiskForm::new();
        let request = form.begin_submit().unwrap();
        assert_eq!(request.profile(), form.profile());
        assert!(form.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut form = HealthRiskForm::new();
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit(), Err(SubmitError::InFlight));
        assert!(form.is_submitting());
    }

    #[test]
    fn success_stores_result() {
        let mut form = HealthRiskForm::new();
        form.begin_submit().unwrap();
        let prediction = RiskPrediction::new(vec![RiskScore::new("liver", "4.2")]);
        form.finish_submit(Ok(prediction.clone()));

        assert_eq!(form.result(), Some(&prediction));
        assert_eq!(form.failure(), None);
    }

    #[test]
    fn failure_shows_only_generic_message() {
        let mut form = HealthRiskForm::new();
        form.begin_submit().unwrap();
        form.finish_submit(Err(anyhow::anyhow!("connection refused (os error 111)")));

        assert_eq!(form.failure(), Some(SUBMISSION_FAILED_MESSAGE));
        assert_eq!(form.result(), None);
    }

    #[test]
    fn success_after_failure_clears_failure() {
        let mut form = HealthRiskForm::new();
        form.begin_submit().unwrap();
        form.finish_submit(Err(anyhow::anyhow!("timeout")));

        form.begin_submit().unwrap();
        form.finish_submit(Ok(RiskPrediction::default()));
        assert_eq!(form.failure(), None);
        assert!(form.result().is_some());
    }

    #[test]
    fn stray_outcome_is_ignored() {
        let mut form = HealthRiskForm::new();
        form.finish_submit(Err(anyhow::anyhow!("late")));
        assert_eq!(form.status(), &SubmissionStatus::Idle);
    }

    #[test]
    fn unknown_option_leaves_errors_untouched() {
        let mut form = HealthRiskForm::new();
        form.edit(Field::Gender, |p| p.gender = None);
        let _ = form.begin_submit();

        assert!(form.set_input(Field::Gender, "other").is_err());
        assert!(form.error_for(Field::Gender).is_some());
    }
}
