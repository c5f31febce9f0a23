use crate::captured_image::{AcquireError, CapturedImage};
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rand::Rng;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

const FRAME_SIZE: u32 = 256;

/// Synthesizes a noisy green leaf frame and encodes it as JPEG.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    shutter_delay: Duration,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            shutter_delay: Duration::from_millis(300),
        }
    }

    #[cfg(test)]
    pub fn with_shutter_delay(mut self, shutter_delay: Duration) -> Self {
        self.shutter_delay = shutter_delay;
        self
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn capture(&self) -> Result<CapturedImage, AcquireError> {
        let _ = self.logger.info("Capturing frame...");
        std::thread::sleep(self.shutter_delay);

        let mut rng = rand::rng();
        let center = FRAME_SIZE as f32 / 2.0;
        let frame = RgbImage::from_fn(FRAME_SIZE, FRAME_SIZE, |x, y| {
            let dx = (x as f32 - center) / center;
            let dy = (y as f32 - center) / (center * 0.6);
            let noise: u8 = rng.random_range(0..24);
            if dx * dx + dy * dy <= 1.0 {
                Rgb([40 + noise, 140 + noise, 50])
            } else {
                Rgb([200, 190 + noise, 170])
            }
        });

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(frame)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .map_err(|e| AcquireError::Camera(e.to_string()))?;

        let _ = self
            .logger
            .info(&format!("Frame captured ({} bytes)", bytes.len()));

        Ok(CapturedImage::new("image.jpeg", "image/jpeg", bytes))
    }
}
