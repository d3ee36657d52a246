//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point the client at a different prediction service, only edit this file.

/// Default prediction service base URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://127.0.0.1:8000
pub const DEFAULT_PREDICT_URL: &str = "https://web-production-cc078.up.railway.app";

/// Default prediction request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default port for the local page/API server
pub const DEFAULT_PORT: u16 = 3000;

/// Score animation duration (milliseconds)
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 1000;

/// Score animation tick cadence (milliseconds)
pub const DEFAULT_ANIMATION_STEP_MS: u64 = 15;

/// Probability above which the result is presented as high risk.
/// Exactly 0.5 routes to the low-risk branch.
pub const HIGH_RISK_THRESHOLD: f64 = 0.5;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "MetaPredict";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get prediction service URL from environment or use default
pub fn get_predict_url() -> String {
    std::env::var("PREDICT_SERVICE_URL").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string())
}

/// Get prediction request timeout from environment or use default
pub fn get_request_timeout() -> u64 {
    std::env::var("PREDICT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Get animation duration from environment or use default
pub fn get_animation_duration_ms() -> u64 {
    std::env::var("ANIMATION_DURATION_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ANIMATION_DURATION_MS)
}

/// Get animation step cadence from environment or use default
pub fn get_animation_step_ms() -> u64 {
    std::env::var("ANIMATION_STEP_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ANIMATION_STEP_MS)
}
