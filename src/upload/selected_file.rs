use crate::error::UploadError;
use crate::upload::preview::PreviewImage;
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A file offered by the dialog or a drop, before it has been validated.
#[derive(Clone, PartialEq)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} bytes)", self.name, self.mime, self.bytes.len())
    }
}

impl FileCandidate {
    /// Uses the platform's declared type when it has one, otherwise sniffs it.
    pub fn new(name: &str, declared_mime: Option<&str>, bytes: Arc<[u8]>) -> Self {
        let mime = match declared_mime {
            Some(mime) if !mime.trim().is_empty() => mime.trim().to_lowercase(),
            _ => detect_mime(name, &bytes),
        };

        Self {
            name: name.to_string(),
            mime,
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self, UploadError> {
        let bytes = std::fs::read(path).map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self::new(&name, None, Arc::from(bytes)))
    }

    pub fn validate(self) -> Result<Self, UploadError> {
        if self.mime.starts_with("image/") {
            Ok(self)
        } else {
            Err(UploadError::NotAnImage { mime: self.mime })
        }
    }
}

/// Type from the file extension, the way a browser declares it. The content is
/// only sniffed when the extension is missing or unknown.
pub fn detect_mime(name: &str, bytes: &[u8]) -> String {
    if let Ok(format) = ImageFormat::from_path(name) {
        return format.to_mime_type().to_string();
    }

    let extension = Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let by_extension = match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "json" => Some("application/json"),
        _ => None,
    };
    if let Some(mime) = by_extension {
        return mime.to_string();
    }

    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => "application/octet-stream".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Decoding,
    Ready(PreviewImage),
    Unavailable(String),
}

/// The image staged for analysis. `id` grows with every accepted file.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub id: u64,
    pub file: FileCandidate,
    pub preview: Preview,
}
