//! Configuration module

use crate::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Prediction service base URL (POST {predict_url}/predict)
    pub predict_url: String,

    /// Local server port
    pub port: u16,

    /// Prediction request timeout in seconds
    pub request_timeout_secs: u64,

    /// Score animation duration in milliseconds
    pub animation_duration_ms: u64,

    /// Score animation tick cadence in milliseconds
    pub animation_step_ms: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            predict_url: constants::get_predict_url(),

            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(constants::DEFAULT_PORT),

            request_timeout_secs: constants::get_request_timeout(),

            animation_duration_ms: constants::get_animation_duration_ms(),

            animation_step_ms: constants::get_animation_step_ms(),

            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predict_url: constants::DEFAULT_PREDICT_URL.to_string(),
            port: constants::DEFAULT_PORT,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
            animation_duration_ms: constants::DEFAULT_ANIMATION_DURATION_MS,
            animation_step_ms: constants::DEFAULT_ANIMATION_STEP_MS,
            environment: "development".to_string(),
        }
    }
}
