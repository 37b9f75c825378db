use crate::error::AnalysisError;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{
    Classification, Prediction, PredictionClient, PredictionRequest,
};
use rand::distr::{Distribution, Uniform};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Behavior {
    Random,
    Returning(Result<Prediction, AnalysisError>),
}

/// Answers without touching the network. `random` backs the offline demo mode,
/// `returning` scripts a single answer for tests.
pub struct PredictionClientFake {
    behavior: Behavior,
    requests: Mutex<Vec<PredictionRequest>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientFake {
    pub fn random(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Random, logger)
    }

    pub fn returning(
        result: Result<Prediction, AnalysisError>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self::with_behavior(Behavior::Returning(result), logger)
    }

    fn with_behavior(behavior: Behavior, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            behavior,
            requests: Mutex::new(vec![]),
            logger: logger.with_namespace("prediction_client").with_namespace("fake"),
        }
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn random_prediction(model: &str) -> Result<Prediction, AnalysisError> {
        let mut rng = rand::rng();
        let confidence_dist = Uniform::new(0.5_f32, 1.0_f32)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let prediction = if rand::random::<bool>() {
            Classification::Fire
        } else {
            Classification::NoFire
        };

        Ok(Prediction {
            prediction,
            confidence: Some(confidence_dist.sample(&mut rng)),
            model: Some(model.to_string()),
        })
    }
}

impl PredictionClient for PredictionClientFake {
    fn predict(&self, request: &PredictionRequest) -> Result<Prediction, AnalysisError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let result = match &self.behavior {
            Behavior::Random => Self::random_prediction(&request.model),
            Behavior::Returning(result) => result.clone(),
        };

        let _ = self.logger.info(&format!(
            "predict({}, {}) -> {:?}",
            request.file_name, request.model, result
        ));

        result
    }
}
