//! Test predictor for exercising the submission flow without a network.
//!
//! `ScriptedPredictor` replays pre-defined HTTP answers (or transport
//! failures) in order and records every request it receives. Answers go
//! through the same [`interpret_response`] as the real client.
//!
//! # Example
//!
//! ```
//! use health_risk::{HealthRiskForm, ScriptedPredictor, SubmissionStatus};
//!
//! let predictor = ScriptedPredictor::new().with_success(&[("Heart_Disease", "12.5")]);
//! let mut form = HealthRiskForm::new();
//!
//! assert!(matches!(form.submit(&predictor), SubmissionStatus::Succeeded(_)));
//! assert_eq!(predictor.calls(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use health_risk_types::{PREDICTED_RISKS_KEY, RiskPrediction};
use serde_json::{Map, Value};

use crate::{PredictionError, PredictionRequest, Predictor, interpret_response};

/// One canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// The service answered with this status and body.
    Response { status: u16, body: String },
    /// The request never got an answer.
    TransportFailure(String),
}

/// Error type for ScriptedPredictor.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedPredictorError {
    #[error("No scripted reply left for request #{0}")]
    Exhausted(usize),

    #[error("Simulated transport failure: {0}")]
    Transport(String),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// A predictor that returns pre-configured replies.
#[derive(Debug, Default)]
pub struct ScriptedPredictor {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<PredictionRequest>>,
}

impl ScriptedPredictor {
    /// Create a predictor with no replies queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: ScriptedReply) -> Self {
        lock(&self.replies).push_back(reply);
        self
    }

    /// Queue a raw HTTP answer.
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.with_reply(ScriptedReply::Response {
            status,
            body: body.into(),
        })
    }

    /// Queue a `200 OK` carrying the given label/percentage pairs.
    pub fn with_success(self, risks: &[(&str, &str)]) -> Self {
        let risks: Map<String, Value> = risks
            .iter()
            .map(|(label, value)| (label.to_string(), Value::String(value.to_string())))
            .collect();
        let mut body = Map::new();
        body.insert(PREDICTED_RISKS_KEY.to_string(), Value::Object(risks));
        self.with_response(200, Value::Object(body).to_string())
    }

    /// Queue a connection-level failure.
    pub fn with_transport_failure(self, detail: impl Into<String>) -> Self {
        self.with_reply(ScriptedReply::TransportFailure(detail.into()))
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PredictionRequest> {
        lock(&self.requests).clone()
    }
}

impl Predictor for ScriptedPredictor {
    type Error = ScriptedPredictorError;

    fn predict(&self, request: &PredictionRequest) -> Result<RiskPrediction, Self::Error> {
        let call = {
            let mut requests = lock(&self.requests);
            requests.push(request.clone());
            requests.len()
        };

        match lock(&self.replies).pop_front() {
            Some(ScriptedReply::Response { status, body }) => {
                Ok(interpret_response(status, &body)?)
            }
            Some(ScriptedReply::TransportFailure(detail)) => {
                Err(ScriptedPredictorError::Transport(detail))
            }
            None => Err(ScriptedPredictorError::Exhausted(call)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
