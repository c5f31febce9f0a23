use crate::captured_image::{AcquireError, CapturedImage};

pub trait DeviceCamera {
    /// Blocks until the shutter fires and the frame is encoded.
    fn capture(&self) -> Result<CapturedImage, AcquireError>;
}
