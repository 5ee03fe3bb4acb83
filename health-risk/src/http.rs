//! HTTP predictor talking to the remote prediction service.

use std::time::Duration;

use health_risk_types::{ResponseError, RiskPrediction};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::{PredictionRequest, Predictor};

/// Base URL used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Path of the prediction endpoint, appended to the base URL.
pub const PREDICT_PATH: &str = "/predict";

/// How much of an error response body is kept for the logs.
const BODY_SNIPPET_LEN: usize = 200;

/// Connection settings for [`HttpPredictor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Base URL of the service, e.g. `http://127.0.0.1:8000`.
    pub endpoint: String,
    /// Transport timeout for the whole request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl PredictorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the prediction endpoint.
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), PREDICT_PATH)
    }
}

/// Error type for [`HttpPredictor`].
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Connection failure, timeout, or an interrupted body.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("Prediction service answered with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but the body is not a prediction.
    #[error("Unreadable prediction response: {0}")]
    Response(#[from] ResponseError),
}

/// Decide what a raw HTTP answer means.
///
/// Any status outside 200..=299 is a failure regardless of the body. A 2xx
/// body must contain a `predicted_risks_percent` object.
pub fn interpret_response(status: u16, body: &str) -> Result<RiskPrediction, PredictionError> {
    if !(200..300).contains(&status) {
        return Err(PredictionError::Status {
            status,
            body: body.chars().take(BODY_SNIPPET_LEN).collect(),
        });
    }
    Ok(RiskPrediction::from_json(body)?)
}

/// Sends one `POST /predict` per call with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    url: String,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PredictionError::Client)?;
        Ok(Self {
            client,
            url: config.predict_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Predictor for HttpPredictor {
    type Error = PredictionError;

    fn predict(&self, request: &PredictionRequest) -> Result<RiskPrediction, Self::Error> {
        let body = request.to_json()?;
        tracing::info!(url = %self.url, "sending prediction request");

        let transport = |source| PredictionError::Transport {
            url: self.url.clone(),
            source,
        };
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(transport)?;

        let status = response.status().as_u16();
        let text = response.text().map_err(transport)?;
        tracing::debug!(status, bytes = text.len(), "prediction response received");

        interpret_response(status, &text)
    }
}
