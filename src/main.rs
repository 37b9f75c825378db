use clap::Parser;
use config::{Args, Backend, Config};
use eframe::egui;
use file_picker::impl_dialog::FilePickerDialog;
use fire_detection::app::FireDetectionApp;
use library::logger::impl_tracing::{self, LoggerTracing};
use library::logger::interface::Logger;
use prediction_client::impl_fake::PredictionClientFake;
use prediction_client::impl_http::PredictionClientHttp;
use prediction_client::interface::PredictionClient;
use std::sync::Arc;

mod config;
mod error;
mod file_picker;
mod fire_detection;
mod library;
mod particles;
mod prediction_client;
mod upload;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default().with_args(Args::parse());

    impl_tracing::init(config.logger_timezone);

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerTracing::new());

    let prediction_client: Arc<dyn PredictionClient + Send + Sync> = match config.backend {
        Backend::Http => Arc::new(PredictionClientHttp::new(
            &config.endpoint_url,
            config.request_timeout,
            logger.clone(),
        )?),
        Backend::Demo => Arc::new(PredictionClientFake::random(logger.clone())),
    };

    let file_picker = Arc::new(FilePickerDialog::new(logger.clone()));

    log_startup(logger.as_ref(), &config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Forest Fire Detection")
            .with_inner_size([960.0, 760.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let app = FireDetectionApp::new(config, logger, prediction_client, file_picker);

    eframe::run_native(
        "Forest Fire Detection",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

fn log_startup(
    logger: &(dyn Logger + Send + Sync),
    config: &Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logger.info("Forest Fire Detection starting")?;
    match config.backend {
        Backend::Http => logger.info(&format!("Prediction endpoint: {}", config.endpoint_url))?,
        Backend::Demo => logger.info("Demo mode: results are random, no requests are sent")?,
    }
    logger.info(&format!("Default model: {}", config.default_model_id()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::log_startup;
    use crate::config::{Backend, Config};
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_log_startup_names_endpoint_or_demo() {
        let logger = LoggerFake::new();
        let config = Config::default();
        log_startup(&logger, &config).unwrap();
        assert!(logger.contains("Prediction endpoint: http://127.0.0.1:5000/predict"));
        assert!(logger.contains("Default model: model1"));

        let logger = LoggerFake::new();
        let config = Config {
            backend: Backend::Demo,
            ..Config::default()
        };
        log_startup(&logger, &config).unwrap();
        assert!(logger.contains("Demo mode"));
        assert!(!logger.contains("Prediction endpoint"));
    }
}
