use crate::captured_image::{AcquireError, CapturedImage};
use image::ImageFormat;
use std::path::Path;

/// Loads a selected file, accepting only image/* types by extension.
/// The contents are not decoded here.
pub fn load_image_file(path: &Path) -> Result<CapturedImage, AcquireError> {
    let format =
        ImageFormat::from_path(path).map_err(|_| AcquireError::NotAnImage(path.to_path_buf()))?;

    let bytes = std::fs::read(path)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(CapturedImage::new(file_name, format.to_mime_type(), bytes))
}
