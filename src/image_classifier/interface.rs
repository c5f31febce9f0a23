use crate::captured_image::CapturedImage;
use serde::Deserialize;
use thiserror::Error;

/// Response body of a successful prediction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence: f64,
}

/// Kept apart for the logs only. Every variant looks the same to the user.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub trait ImageClassifier {
    fn predict(&self, image: &CapturedImage) -> Result<PredictionResult, PredictError>;
    fn ping(&self) -> Result<String, PredictError>;
}
