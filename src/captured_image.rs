use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
}

/// Image bytes obtained from the file picker or the camera.
///
/// The bytes are shared, so cloning into effects and views is cheap.
#[derive(Clone, PartialEq)]
pub struct CapturedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
    /// `None` when the header could not be read. The image is still
    /// uploaded; the service decides whether it is usable.
    pub preview: Option<Preview>,
}

impl CapturedImage {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let preview = read_preview(&bytes);
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: Arc::from(bytes),
            preview,
        }
    }

    pub fn describe(&self) -> String {
        match self.preview {
            Some(Preview { width, height }) => format!(
                "{} ({}x{}, {})",
                self.file_name, width, height, self.content_type
            ),
            None => format!("{} ({})", self.file_name, self.content_type),
        }
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("preview", &self.preview)
            .finish()
    }
}

fn read_preview(bytes: &[u8]) -> Option<Preview> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some(Preview { width, height })
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("{0} is not an image file")]
    NotAnImage(PathBuf),
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("camera failed: {0}")]
    Camera(String),
}
