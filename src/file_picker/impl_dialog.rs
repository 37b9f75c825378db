use crate::file_picker::interface::FilePicker;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FilePickerDialog {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FilePickerDialog {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("file_picker").with_namespace("dialog"),
        }
    }
}

impl FilePicker for FilePickerDialog {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening file dialog...")?;

        let picked = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", &["jpg", "jpeg", "png"])
            .pick_file();

        match &picked {
            Some(path) => self.logger.info(&format!("Picked {}", path.display()))?,
            None => self.logger.info("File dialog cancelled")?,
        }

        Ok(picked)
    }
}
