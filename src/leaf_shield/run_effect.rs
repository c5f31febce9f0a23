use crate::captured_image::CapturedImage;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::file_picker::load_image_file;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::leaf_shield::core::{Effect, Msg};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    msg_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        msg_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_camera,
            device_display,
            image_classifier,
            msg_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToDisplayEvents => {
                let events = match self.device_display.lock() {
                    Ok(device_display) => device_display.events(),
                    Err(_) => {
                        let _ = self.logger.error("Display lock poisoned, input unavailable");
                        return;
                    }
                };
                // Ends when the display drops its senders.
                while let Ok(event) = events.recv() {
                    if self.msg_sender.send(Msg::DisplayEvent(event)).is_err() {
                        return;
                    }
                }
            }
            Effect::CheckService => match self.image_classifier.ping() {
                Ok(reply) => {
                    let _ = self
                        .logger
                        .info(&format!("Prediction service is up: {}", reply.trim()));
                }
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Prediction service unreachable: {}", e));
                }
            },
            Effect::LoadFile { path, acquisition } => {
                let result = load_image_file(&path);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Error: {}", e));
                }
                let _ = self.msg_sender.send(Msg::AcquireDone {
                    acquisition,
                    result,
                });
            }
            Effect::CaptureImage { acquisition } => {
                let result = self.device_camera.capture();
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Error: {}", e));
                }
                let _ = self.msg_sender.send(Msg::AcquireDone {
                    acquisition,
                    result,
                });
            }
            Effect::SaveCapture { image } => {
                let Some(dir) = &self.config.capture_save_dir else {
                    return;
                };
                match save_capture(dir, &image) {
                    Ok(path) => {
                        let _ = self
                            .logger
                            .info(&format!("Saved capture to {}", path.display()));
                    }
                    Err(e) => {
                        let _ = self.logger.error(&format!("Error: {}", e));
                    }
                }
            }
            Effect::PredictImage { image, request } => {
                let result = self.image_classifier.predict(&image);
                // Caught and logged only; the view just stops loading.
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Error: {}", e));
                }
                let _ = self.msg_sender.send(Msg::PredictDone { request, result });
            }
        }
    }
}

pub fn save_capture(dir: &Path, image: &CapturedImage) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let extension = Path::new(&image.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpeg");
    let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S%.3f");
    let path = dir.join(format!("leaf-{}.{}", timestamp, extension));

    std::fs::write(&path, &image.bytes[..])?;
    Ok(path)
}
