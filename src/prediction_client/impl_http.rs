use crate::error::AnalysisError;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{
    interpret_response, Prediction, PredictionClient, PredictionRequest,
};
use reqwest::blocking::multipart::{Form, Part};
use std::sync::Arc;
use std::time::Duration;

pub struct PredictionClientHttp {
    client: reqwest::blocking::Client,
    endpoint_url: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientHttp {
    pub fn new(
        endpoint_url: &str,
        timeout: Option<Duration>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, AnalysisError> {
        // `None` disables the blocking client's built-in 30s timeout.
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.to_string(),
            logger: logger.with_namespace("prediction_client").with_namespace("http"),
        })
    }
}

impl PredictionClient for PredictionClientHttp {
    fn predict(&self, request: &PredictionRequest) -> Result<Prediction, AnalysisError> {
        let _ = self.logger.info(&format!(
            "POST {} image={} ({} bytes, {}) model={}",
            self.endpoint_url,
            request.file_name,
            request.bytes.len(),
            request.mime,
            request.model
        ));

        let image = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime)?;

        let form = Form::new()
            .part("image", image)
            .text("model", request.model.clone());

        let response = self.client.post(&self.endpoint_url).multipart(form).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        let _ = self
            .logger
            .info(&format!("Response {} ({} bytes)", status, body.len()));

        interpret_response(status, &body)
    }
}
