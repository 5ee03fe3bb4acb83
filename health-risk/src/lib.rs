//! # health-risk
//!
//! Collect a health profile, validate it, and submit it to a remote risk
//! prediction service. Frontend-agnostic.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use health_risk::{Field, HealthRiskForm, HttpPredictor, PredictorConfig, SubmissionStatus};
//!
//! fn main() -> anyhow::Result<()> {
//!     let predictor = HttpPredictor::new(&PredictorConfig::default())?;
//!     let mut form = HealthRiskForm::new();
//!     form.set_input(Field::Age, "52")?;
//!     form.set_input(Field::SmokingStatus, "former")?;
//!
//!     match form.submit(&predictor) {
//!         SubmissionStatus::Succeeded(prediction) => {
//!             for (label, value) in prediction.display_rows() {
//!                 println!("{label}: {value}");
//!             }
//!         }
//!         SubmissionStatus::Invalid(errors) => {
//!             for (field, message) in errors.iter() {
//!                 println!("{field}: {message}");
//!             }
//!         }
//!         SubmissionStatus::Failed(message) => println!("{message}"),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Frontends
//!
//! Frontends own a [`HealthRiskForm`], forward edits with
//! [`HealthRiskForm::set_input`], and drive submissions either with
//! [`HealthRiskForm::submit`] or, when the request runs elsewhere, with
//! [`HealthRiskForm::begin_submit`] and [`HealthRiskForm::finish_submit`]:
//! - `health-risk-ratatui-form` - TUI form with all fields visible

// Re-export all types from health-risk-types
pub use health_risk_types::*;

mod validator;
pub use validator::{
    BP_DIASTOLIC_RANGE, BP_SYSTOLIC_RANGE, CHOLESTEROL_RANGE, FASTING_GLUCOSE_RANGE,
    SLEEP_HOURS_RANGE, is_valid, validate,
};

mod predictor;
pub use predictor::{PredictionRequest, Predictor};

mod form;
pub use form::{HealthRiskForm, SUBMISSION_FAILED_MESSAGE, SubmissionStatus, SubmitError};

mod http;
pub use http::{
    DEFAULT_ENDPOINT, HttpPredictor, PREDICT_PATH, PredictionError, PredictorConfig,
    interpret_response,
};

// Test predictor for exercising submissions without a network
mod test_predictor;
pub use test_predictor::{ScriptedPredictor, ScriptedPredictorError, ScriptedReply};
