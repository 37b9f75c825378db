use crate::file_picker::interface::FilePicker;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FilePickerFake {
    picked: Option<PathBuf>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FilePickerFake {
    pub fn new(picked: Option<PathBuf>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            picked,
            logger: logger.with_namespace("file_picker").with_namespace("fake"),
        }
    }
}

impl FilePicker for FilePickerFake {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("FilePickerFake::pick_image() -> {:?}", self.picked))?;
        Ok(self.picked.clone())
    }
}
