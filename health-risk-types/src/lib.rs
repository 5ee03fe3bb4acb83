//! Core types for the health-risk crate.
//!
//! This crate provides the foundational types for the health risk form:
//! - `HealthProfile` - The values entered by the user, serialized as the request body
//! - `Field` and `Section` - Field metadata (wire names, labels, options)
//! - `ValidationErrors` - Per-field validation messages
//! - `RiskPrediction` and `RiskScore` - The result returned by the prediction service

mod field;
pub use field::{ChoiceOption, Field, FieldKind, Section};

mod choice;
pub use choice::{ActivityLevel, AlcoholUse, ExistingCondition, Gender, SmokingStatus};

mod profile;
pub use profile::HealthProfile;

mod validation_errors;
pub use validation_errors::ValidationErrors;

mod prediction;
pub use prediction::{PREDICTED_RISKS_KEY, RiskPrediction, RiskScore, humanize_label};

mod error;
pub use error::{FieldValueError, ResponseError};
