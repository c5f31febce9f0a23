use crate::captured_image::CapturedImage;
use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_classifier::impl_fake::{FakeOutcome, ImageClassifierFake};
use crate::image_classifier::interface::PredictionResult;
use crate::leaf_shield::core::Msg;
use crate::leaf_shield::main::LeafShield;
use crate::library::logger::impl_fake::LoggerFake;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn leaf(name: &str) -> CapturedImage {
    CapturedImage::new(name, "image/jpeg", name.as_bytes().to_vec())
}

pub fn healthy() -> PredictionResult {
    PredictionResult {
        predicted_class: "Healthy".to_string(),
        confidence: 0.8734,
    }
}

pub struct Fixture {
    pub logger: LoggerFake,
    pub device_display: DeviceDisplayFake,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub leaf_shield: LeafShield,
}

impl Fixture {
    pub fn new(config: Config, outcome: FakeOutcome) -> Self {
        let logger = LoggerFake::new();
        let device_camera = Arc::new(
            DeviceCameraFake::new(Arc::new(logger.clone())).with_shutter_delay(Duration::ZERO),
        );
        let device_display = DeviceDisplayFake::new();
        let image_classifier = Arc::new(
            ImageClassifierFake::new(Arc::new(logger.clone()))
                .with_outcome(outcome)
                .with_delay(Duration::ZERO),
        );
        let leaf_shield = LeafShield::new(
            config,
            Arc::new(logger.clone()),
            device_camera,
            Arc::new(Mutex::new(device_display.clone())),
            image_classifier.clone(),
        );

        Self {
            logger,
            device_display,
            image_classifier,
            leaf_shield,
        }
    }

    pub fn next_msg(&self) -> Msg {
        self.leaf_shield
            .msg_receiver
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .expect("effect never reported back")
    }

    pub fn no_more_msgs(&self) -> bool {
        self.leaf_shield
            .msg_receiver
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_millis(200))
            .is_err()
    }
}
