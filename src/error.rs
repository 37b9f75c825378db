use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Please upload a valid image file (JPG, PNG, JPEG)")]
    NotAnImage { mime: String },
    #[error("Failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("File dialog failed: {0}")]
    Dialog(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server error: {status}{}", detail(.message))]
    Status { status: u16, message: Option<String> },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to decode preview: {0}")]
pub struct PreviewError(pub String);

impl From<image::ImageError> for PreviewError {
    fn from(err: image::ImageError) -> Self {
        PreviewError(err.to_string())
    }
}
