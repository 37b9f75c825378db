use crate::error::PreviewError;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<[u8]>,
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewImage({}x{})", self.width, self.height)
    }
}

/// Decodes the staged bytes and shrinks them to fit within `max_side`.
pub fn decode_preview(bytes: &[u8], max_side: u32) -> Result<PreviewImage, PreviewError> {
    let image = image::load_from_memory(bytes)?;

    let image = if image.width() > max_side || image.height() > max_side {
        image.thumbnail(max_side, max_side)
    } else {
        image
    };

    let rgba = image.to_rgba8();

    Ok(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: Arc::from(rgba.into_raw()),
    })
}
