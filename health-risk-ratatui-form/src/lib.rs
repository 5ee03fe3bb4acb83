//! Ratatui frontend for the health risk form.
//!
//! Displays every field at once, grouped into sections, in a scrollable
//! form with keyboard navigation. Submissions run on a background thread so
//! the button can show progress while the request is in flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use health_risk::{HttpPredictor, PredictorConfig};
//! use health_risk_ratatui_form::RatatuiForm;
//!
//! fn main() -> anyhow::Result<()> {
//!     let predictor = Arc::new(HttpPredictor::new(&PredictorConfig::default())?);
//!     let form = RatatuiForm::new().with_title("Health Risk Assessment").run(predictor)?;
//!     println!("{}", form.status().name());
//!     Ok(())
//! }
//! ```

mod form;
mod render;
mod state;
mod worker;

pub use form::{RatatuiForm, RatatuiFormError};
pub use render::{SUBMIT_LABEL, SUBMITTING_LABEL, Theme, draw_form};
pub use state::{FormState, KeyOutcome};
pub use worker::{SubmissionWorker, WorkerHandle};
