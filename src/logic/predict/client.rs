//! Prediction API Client
//!
//! HTTP client for the external risk-scoring service. One POST per user
//! submission; the call is never retried automatically, since repeating a
//! submission must stay an explicit user action.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants;
use crate::logic::form::PredictionPayload;

/// Prediction service configuration
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            base_url: constants::get_predict_url(),
            timeout_secs: constants::get_request_timeout(),
        }
    }
}

/// One feature's share of the predicted risk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    pub feature: String,
    pub contribution: f64,
}

/// Validated scoring result
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    /// Risk probability, guaranteed to be in [0, 1]
    pub probability: f64,
    /// Feature contributions in the order the service produced them
    pub contributions: Vec<Contribution>,
}

/// Prediction client errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error: {0}")]
    ServerError(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Prediction API client
pub struct PredictClient {
    config: PredictConfig,
    http_client: reqwest::Client,
}

impl PredictClient {
    /// Create new prediction client
    pub fn new(config: PredictConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http_client }
    }

    /// Submit one payload for scoring. A timeout counts as a network
    /// failure, as does any non-2xx status.
    pub async fn submit(&self, payload: &PredictionPayload) -> Result<PredictionResponse, PredictError> {
        let url = format!("{}/predict", self.config.base_url);

        tracing::info!("Submitting prediction request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictError::Network("request timed out".to_string())
                } else {
                    PredictError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(PredictError::ServerError(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PredictError::Malformed(e.to_string()))?;

        parse_response(body)
    }
}

/// Check the response body shape: `probability` must be a number in
/// [0, 1] and `contributions` must be a sequence of feature entries.
fn parse_response(body: Value) -> Result<PredictionResponse, PredictError> {
    let probability = body
        .get("probability")
        .and_then(Value::as_f64)
        .ok_or_else(|| PredictError::Malformed("missing or non-numeric 'probability'".to_string()))?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(PredictError::Malformed(format!(
            "'probability' out of range: {}",
            probability
        )));
    }

    let entries = body
        .get("contributions")
        .and_then(Value::as_array)
        .ok_or_else(|| PredictError::Malformed("'contributions' is not a sequence".to_string()))?;

    let mut contributions = Vec::with_capacity(entries.len());
    for entry in entries {
        let feature = entry
            .get("feature")
            .and_then(Value::as_str)
            .ok_or_else(|| PredictError::Malformed("contribution entry missing 'feature'".to_string()))?;
        let contribution = entry
            .get("contribution")
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                PredictError::Malformed("contribution entry missing 'contribution'".to_string())
            })?;

        contributions.push(Contribution {
            feature: feature.to_string(),
            contribution,
        });
    }

    Ok(PredictionResponse {
        probability,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_valid_body() {
        let body = json!({
            "probability": 0.72,
            "contributions": [
                {"feature": "BloodGlucose", "contribution": 0.4},
                {"feature": "HDL", "contribution": 0.3}
            ]
        });

        let parsed = parse_response(body).unwrap();
        assert_eq!(parsed.probability, 0.72);
        assert_eq!(parsed.contributions.len(), 2);
        assert_eq!(parsed.contributions[0].feature, "BloodGlucose");
    }

    #[test]
    fn parse_accepts_empty_contributions() {
        let body = json!({"probability": 0.1, "contributions": []});
        let parsed = parse_response(body).unwrap();
        assert!(parsed.contributions.is_empty());
    }

    #[test]
    fn parse_rejects_missing_probability() {
        let body = json!({"contributions": []});
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, PredictError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_out_of_range_probability() {
        for p in [-0.1, 1.5] {
            let body = json!({"probability": p, "contributions": []});
            let err = parse_response(body).unwrap_err();
            assert!(matches!(err, PredictError::Malformed(_)), "p = {}", p);
        }
    }

    #[test]
    fn parse_accepts_boundary_probabilities() {
        for p in [0.0, 1.0] {
            let body = json!({"probability": p, "contributions": []});
            assert!(parse_response(body).is_ok(), "p = {}", p);
        }
    }

    #[test]
    fn parse_rejects_non_sequence_contributions() {
        let body = json!({"probability": 0.4, "contributions": "lots"});
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, PredictError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_malformed_entry() {
        let body = json!({
            "probability": 0.4,
            "contributions": [{"contribution": 0.2}]
        });
        assert!(parse_response(body).is_err());
    }

    #[test]
    fn parse_preserves_contribution_order() {
        let body = json!({
            "probability": 0.9,
            "contributions": [
                {"feature": "UricAcid", "contribution": 0.1},
                {"feature": "HDL", "contribution": 0.8},
                {"feature": "WaistCirc", "contribution": 0.3}
            ]
        });

        let features: Vec<String> = parse_response(body)
            .unwrap()
            .contributions
            .into_iter()
            .map(|c| c.feature)
            .collect();

        assert_eq!(features, vec!["UricAcid", "HDL", "WaistCirc"]);
    }
}
