use health_risk_types::{HealthProfile, RiskPrediction};

/// A validated profile, ready to be sent to a [`Predictor`].
///
/// Only [`HealthRiskForm::begin_submit`](crate::HealthRiskForm::begin_submit)
/// creates these, so holding one means validation passed.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    profile: HealthProfile,
}

impl PredictionRequest {
    pub(crate) fn new(profile: HealthProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }

    /// The JSON request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.profile)
    }
}

/// Trait for anything that can turn a profile into risk percentages.
///
/// The production implementation is [`HttpPredictor`](crate::HttpPredictor);
/// [`ScriptedPredictor`](crate::ScriptedPredictor) replays canned responses
/// for tests. Implementations make exactly one attempt per call and never retry.
pub trait Predictor {
    /// The error type for this predictor.
    type Error: Into<anyhow::Error>;

    /// Request a prediction for one profile.
    ///
    /// # Returns
    /// * `Ok(prediction)` when the service answered with a usable result
    /// * `Err` on transport failure, error status, or an unreadable body
    fn predict(&self, request: &PredictionRequest) -> Result<RiskPrediction, Self::Error>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    type Error = P::Error;

    fn predict(&self, request: &PredictionRequest) -> Result<RiskPrediction, Self::Error> {
        (**self).predict(request)
    }
}

impl<P: Predictor + ?Sized> Predictor for std::sync::Arc<P> {
    type Error = P::Error;

    fn predict(&self, request: &PredictionRequest) -> Result<RiskPrediction, Self::Error> {
        (**self).predict(request)
    }
}
