use serde_json::Value;

use crate::ResponseError;

/// Key of the risk mapping in a successful prediction response.
pub const PREDICTED_RISKS_KEY: &str = "predicted_risks_percent";

/// A single risk label paired with its percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskScore {
    /// Label exactly as sent by the service, e.g. `"Heart_Disease"`.
    pub label: String,
    /// Percentage as text, e.g. `"12.5"`.
    pub value: String,
}

impl RiskScore {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// `"Heart_Disease"` becomes `"Heart Disease"`.
    pub fn display_label(&self) -> String {
        humanize_label(&self.label)
    }

    /// `"12.5"` becomes `"12.5%"`.
    pub fn display_value(&self) -> String {
        format!("{}%", self.value)
    }
}

/// The risk percentages returned by the prediction service, in the order it sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskPrediction {
    scores: Vec<RiskScore>,
}

impl RiskPrediction {
    pub fn new(scores: Vec<RiskScore>) -> Self {
        Self { scores }
    }

    /// Parse a prediction response body.
    ///
    /// The body must be a JSON object with a `predicted_risks_percent` object.
    /// Percentages may be JSON strings or numbers.
    pub fn from_json(body: &str) -> Result<Self, ResponseError> {
        let value: Value = serde_json::from_str(body)?;
        let risks = value
            .get(PREDICTED_RISKS_KEY)
            .and_then(Value::as_object)
            .ok_or(ResponseError::MissingKey(PREDICTED_RISKS_KEY))?;

        let scores = risks
            .iter()
            .map(|(label, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => match n.as_i64() {
                        Some(i) => i.to_string(),
                        None => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
                    },
                    other => {
                        return Err(ResponseError::InvalidValue {
                            label: label.clone(),
                            value: other.to_string(),
                        });
                    }
                };
                Ok(RiskScore::new(label.clone(), text))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { scores })
    }

    /// Look up the score for a label as sent by the service.
    pub fn get(&self, label: &str) -> Option<&RiskScore> {
        self.scores.iter().find(|score| score.label == label)
    }

    pub fn scores(&self) -> &[RiskScore] {
        &self.scores
    }

    /// Pairs of display label and display value, e.g. `("Heart Disease", "12.5%")`.
    pub fn display_rows(&self) -> Vec<(String, String)> {
        self.scores
            .iter()
            .map(|score| (score.display_label(), score.display_value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Turn a risk key into a heading: underscores become spaces and the first
/// letter of every word is capitalized.
pub fn humanize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_is_word = false;
    for c in label.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}
