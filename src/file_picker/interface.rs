use std::path::PathBuf;

pub trait FilePicker: Send + Sync {
    /// Blocks until the user picks a file or cancels (`Ok(None)`).
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;
}
