use crate::error::AnalysisError;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq)]
pub struct PredictionRequest {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    pub model: String,
}

impl fmt::Debug for PredictionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} bytes) with {}",
            self.file_name,
            self.mime,
            self.bytes.len(),
            self.model
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Classification {
    #[serde(rename = "fire", alias = "FOREST FIRE DETECTED")]
    Fire,
    #[serde(rename = "no_fire")]
    NoFire,
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub prediction: Classification,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Prediction {
    pub fn parse(body: &str) -> Result<Self, AnalysisError> {
        let prediction: Prediction = serde_json::from_str(body)?;

        if let Some(confidence) = prediction.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "confidence {} is outside [0, 1]",
                    confidence
                )));
            }
        }

        Ok(prediction)
    }

    pub fn is_fire(&self) -> bool {
        self.prediction == Classification::Fire
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Maps a raw HTTP status and body to a prediction or a failure.
pub fn interpret_response(status: u16, body: &str) -> Result<Prediction, AnalysisError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|body| body.error);
        return Err(AnalysisError::Status { status, message });
    }

    Prediction::parse(body)
}

pub trait PredictionClient: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<Prediction, AnalysisError>;
}
