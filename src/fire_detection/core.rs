use crate::config::Config;
use crate::error::{AnalysisError, PreviewError, UploadError};
use crate::prediction_client::interface::{Prediction, PredictionRequest};
use crate::upload::preview::PreviewImage;
use crate::upload::selected_file::{FileCandidate, Preview, SelectedFile};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const MODEL_SWITCHED_MESSAGE: &str = "Model Switched Successfully";
pub const NO_FILE_MESSAGE: &str = "Please upload an image first";
pub const RESET_PROMPT: &str = "Reset and upload new image?";
pub const ANALYZE_LABEL_IDLE: &str = "Analyze Image";
pub const ANALYZE_LABEL_BUSY: &str = "Analyzing...";

#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    Placeholder,
    Processing { request_id: u64 },
    Positive(Prediction),
    Negative(Prediction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub shown_at: Instant,
}

/// Modal dialogs. While one is open, user input other than answering it is
/// ignored.
#[derive(Clone, Debug, PartialEq)]
pub enum Dialog {
    Alert { message: String },
    ConfirmReset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub selected_file: Option<SelectedFile>,
    pub selected_model: String,
    pub result: ResultView,
    pub in_flight: Option<u64>,
    /// A request dropped by a reset whose worker has not answered yet.
    pub abandoned: Option<u64>,
    pub drag_hover: bool,
    pub notice: Option<Notice>,
    pub dialog: Option<Dialog>,
    pub last_file_id: u64,
    pub last_request_id: u64,
    pub last_notice_id: u64,
}

impl State {
    pub fn new(selected_model: String) -> Self {
        Self {
            selected_file: None,
            selected_model,
            result: ResultView::Placeholder,
            in_flight: None,
            abandoned: None,
            drag_hover: false,
            notice: None,
            dialog: None,
            last_file_id: 0,
            last_request_id: 0,
            last_notice_id: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.abandoned.is_some()
    }

    pub fn analyze_enabled(&self) -> bool {
        self.selected_file.is_some() && !self.is_busy()
    }

    pub fn analyze_label(&self) -> &'static str {
        if self.is_busy() {
            ANALYZE_LABEL_BUSY
        } else {
            ANALYZE_LABEL_IDLE
        }
    }
}

#[derive(Debug)]
pub enum Event {
    BrowseRequested,
    DragHovered(bool),
    FileDropped(PathBuf),
    FileLoaded(Result<FileCandidate, UploadError>),
    PreviewDecoded {
        file_id: u64,
        result: Result<PreviewImage, PreviewError>,
    },
    ModelSelected(String),
    NoticeExpired(u64),
    AnalyzeRequested,
    AnalysisDone {
        request_id: u64,
        result: Result<Prediction, AnalysisError>,
    },
    RevealOutcome {
        request_id: u64,
        prediction: Prediction,
    },
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
    EscapePressed,
    AlertDismissed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PickFile,
    ReadFile {
        path: PathBuf,
    },
    DecodePreview {
        file_id: u64,
        bytes: Arc<[u8]>,
    },
    SubmitAnalysis {
        request_id: u64,
        request: PredictionRequest,
    },
    RevealAfter {
        request_id: u64,
        prediction: Prediction,
        delay: Duration,
    },
    ExpireNoticeAfter {
        notice_id: u64,
        delay: Duration,
    },
    SpawnFireBurst,
    ScrollToResult,
}

impl Effect {
    /// Effects that only touch the view and never leave the UI thread.
    pub fn is_view_local(&self) -> bool {
        matches!(self, Effect::SpawnFireBurst | Effect::ScrollToResult)
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Effect::DecodePreview { file_id, bytes } => {
                format!("DecodePreview {{ file_id: {}, {} bytes }}", file_id, bytes.len())
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init(config: &Config) -> (State, Vec<Effect>) {
    (State::new(config.default_model_id()), vec![])
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    let dialog_open = state.dialog.is_some();

    match event {
        // Upload
        Event::BrowseRequested => {
            if dialog_open || state.selected_file.is_some() {
                (state, vec![])
            } else {
                (state, vec![Effect::PickFile])
            }
        }
        Event::DragHovered(drag_hover) => (State { drag_hover, ..state }, vec![]),
        Event::FileDropped(path) => {
            let state = State {
                drag_hover: false,
                ..state
            };
            if dialog_open {
                (state, vec![])
            } else {
                (state, vec![Effect::ReadFile { path }])
            }
        }
        Event::FileLoaded(Ok(candidate)) => match candidate.validate() {
            Ok(file) => accept_file(state, file),
            Err(err) => alert(state, err.to_string()),
        },
        Event::FileLoaded(Err(err)) => alert(state, err.to_string()),
        Event::PreviewDecoded { file_id, result } => {
            let mut state = state;
            if let Some(selected) = state.selected_file.as_mut() {
                if selected.id == file_id {
                    selected.preview = match result {
                        Ok(image) => Preview::Ready(image),
                        Err(err) => Preview::Unavailable(err.to_string()),
                    };
                }
            }
            (state, vec![])
        }

        // Model selection
        Event::ModelSelected(model) => {
            if dialog_open || !config.has_model(&model) {
                return (state, vec![]);
            }
            let notice_id = state.last_notice_id + 1;
            (
                State {
                    selected_model: model,
                    notice: Some(Notice {
                        id: notice_id,
                        message: MODEL_SWITCHED_MESSAGE.to_string(),
                        shown_at: Instant::now(),
                    }),
                    last_notice_id: notice_id,
                    ..state
                },
                vec![Effect::ExpireNoticeAfter {
                    notice_id,
                    delay: config.notice_duration,
                }],
            )
        }
        Event::NoticeExpired(notice_id) => match &state.notice {
            Some(notice) if notice.id == notice_id => (
                State {
                    notice: None,
                    ..state
                },
                vec![],
            ),
            _ => (state, vec![]),
        },

        // Analysis
        Event::AnalyzeRequested => {
            if dialog_open || state.is_busy() {
                return (state, vec![]);
            }
            let request = state
                .selected_file
                .as_ref()
                .map(|selected| PredictionRequest {
                    file_name: selected.file.name.clone(),
                    mime: selected.file.mime.clone(),
                    bytes: Arc::clone(&selected.file.bytes),
                    model: state.selected_model.clone(),
                });
            let Some(request) = request else {
                return alert(state, NO_FILE_MESSAGE.to_string());
            };

            let request_id = state.last_request_id + 1;

            (
                State {
                    result: ResultView::Processing { request_id },
                    in_flight: Some(request_id),
                    last_request_id: request_id,
                    ..state
                },
                vec![Effect::SubmitAnalysis {
                    request_id,
                    request,
                }],
            )
        }
        Event::AnalysisDone { request_id, result } => {
            if state.abandoned == Some(request_id) {
                return (
                    State {
                        abandoned: None,
                        ..state
                    },
                    vec![],
                );
            }
            if state.in_flight != Some(request_id) {
                return (state, vec![]);
            }
            let state = State {
                in_flight: None,
                ..state
            };
            match result {
                Ok(prediction) => (
                    state,
                    vec![Effect::RevealAfter {
                        request_id,
                        prediction,
                        delay: config.result_display_delay,
                    }],
                ),
                Err(err) => alert(
                    State {
                        result: ResultView::Placeholder,
                        ..state
                    },
                    failure_message(config, &err),
                ),
            }
        }
        Event::RevealOutcome {
            request_id,
            prediction,
        } => {
            if state.result != (ResultView::Processing { request_id }) {
                return (state, vec![]);
            }
            if prediction.is_fire() {
                (
                    State {
                        result: ResultView::Positive(prediction),
                        ..state
                    },
                    vec![Effect::SpawnFireBurst, Effect::ScrollToResult],
                )
            } else {
                (
                    State {
                        result: ResultView::Negative(prediction),
                        ..state
                    },
                    vec![Effect::ScrollToResult],
                )
            }
        }

        // Reset
        Event::ResetRequested => {
            if dialog_open || state.selected_file.is_none() {
                (state, vec![])
            } else {
                (
                    State {
                        dialog: Some(Dialog::ConfirmReset),
                        ..state
                    },
                    vec![],
                )
            }
        }
        Event::ResetConfirmed => match state.dialog {
            Some(Dialog::ConfirmReset) => (reset(state), vec![]),
            _ => (state, vec![]),
        },
        Event::ResetCancelled | Event::AlertDismissed => (
            State {
                dialog: None,
                ..state
            },
            vec![],
        ),
        Event::EscapePressed => {
            if dialog_open {
                (
                    State {
                        dialog: None,
                        ..state
                    },
                    vec![],
                )
            } else if state.selected_file.is_some() {
                (reset(state), vec![])
            } else {
                (state, vec![])
            }
        }
    }
}

fn accept_file(state: State, file: FileCandidate) -> (State, Vec<Effect>) {
    let file_id = state.last_file_id + 1;
    let bytes = Arc::clone(&file.bytes);

    // An outcome on screen belongs to the previous file; an analysis still
    // running keeps its processing view.
    let result = match state.result {
        ResultView::Processing { request_id } => ResultView::Processing { request_id },
        _ => ResultView::Placeholder,
    };

    (
        State {
            selected_file: Some(SelectedFile {
                id: file_id,
                file,
                preview: Preview::Decoding,
            }),
            result,
            last_file_id: file_id,
            ..state
        },
        vec![Effect::DecodePreview { file_id, bytes }],
    )
}

fn alert(state: State, message: String) -> (State, Vec<Effect>) {
    (
        State {
            dialog: Some(Dialog::Alert { message }),
            ..state
        },
        vec![],
    )
}

pub fn failure_message(config: &Config, err: &AnalysisError) -> String {
    format!(
        "Analysis failed: {}\n\nMake sure the prediction service is running at {}.",
        err, config.endpoint_url
    )
}

/// Back to an empty upload zone. A request still in flight is abandoned: its
/// result is dropped when it arrives, and no new request starts before then.
pub fn reset(state: State) -> State {
    State {
        selected_file: None,
        result: ResultView::Placeholder,
        abandoned: state.in_flight.or(state.abandoned),
        in_flight: None,
        drag_hover: false,
        dialog: None,
        ..state
    }
}
