//! Prediction Service Module - Client for the External Scoring Endpoint
//!
//! This module handles:
//! - Submitting the typed payload to `POST {base}/predict`
//! - Mapping transport/status failures to network errors
//! - Rejecting response bodies that are missing required fields

pub mod client;

pub use client::{Contribution, PredictClient, PredictConfig, PredictError, PredictionResponse};
