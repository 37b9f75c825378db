use crate::config::Config;
use crate::error::UploadError;
use crate::file_picker::interface::FilePicker;
use crate::fire_detection::core::{Effect, Event};
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::PredictionClient;
use crate::upload::preview::decode_preview;
use crate::upload::selected_file::FileCandidate;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    file_picker: Arc<dyn FilePicker + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("run_effect"),
            prediction_client,
            file_picker,
            event_sender,
        }
    }

    pub fn spawn(&self, effect: Effect) {
        let self_clone = self.clone();
        std::thread::spawn(move || self_clone.run_effect(effect));
    }

    /// Runs one effect to completion on the calling thread.
    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::PickFile => match self.file_picker.pick_image() {
                Ok(Some(path)) => {
                    let loaded = FileCandidate::read(&path);
                    let _ = self.event_sender.send(Event::FileLoaded(loaded));
                }
                Ok(None) => {}
                Err(e) => {
                    let _ = self
                        .event_sender
                        .send(Event::FileLoaded(Err(UploadError::Dialog(e.to_string()))));
                }
            },
            Effect::ReadFile { path } => {
                let loaded = FileCandidate::read(&path);
                let _ = self.event_sender.send(Event::FileLoaded(loaded));
            }
            Effect::DecodePreview { file_id, bytes } => {
                let result = decode_preview(&bytes, self.config.preview_max_side);
                if let Err(e) = &result {
                    let _ = self.logger.warn(&e.to_string());
                }
                let _ = self
                    .event_sender
                    .send(Event::PreviewDecoded { file_id, result });
            }
            Effect::SubmitAnalysis {
                request_id,
                request,
            } => {
                let result = self.prediction_client.predict(&request);
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .warn(&format!("Analysis {} failed: {}", request_id, e));
                }
                let _ = self
                    .event_sender
                    .send(Event::AnalysisDone { request_id, result });
            }
            Effect::RevealAfter {
                request_id,
                prediction,
                delay,
            } => {
                std::thread::sleep(delay);
                let _ = self.event_sender.send(Event::RevealOutcome {
                    request_id,
                    prediction,
                });
            }
            Effect::ExpireNoticeAfter { notice_id, delay } => {
                std::thread::sleep(delay);
                let _ = self.event_sender.send(Event::NoticeExpired(notice_id));
            }
            Effect::SpawnFireBurst | Effect::ScrollToResult => {
                let _ = self
                    .logger
                    .warn("View effect reached the worker pool; ignoring");
            }
        }
    }
}
