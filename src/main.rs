use config::{ClassifierKind, Config, DisplayKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use leaf_shield::main::LeafShield;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod captured_image;
mod config;
mod device_camera;
mod device_display;
mod file_picker;
mod image_classifier;
mod leaf_shield;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let _ = logger.info(&format!(
        "Starting {:?} client against {}",
        config.client, config.predict_url
    ));

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayKind::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayKind::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new())),
    };

    device_display
        .lock()
        .map_err(|_| "display lock poisoned")?
        .init()?;

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match config.classifier {
        ClassifierKind::Http => Arc::new(ImageClassifierHttp::new(&config, logger.clone())?),
        ClassifierKind::Fake => Arc::new(ImageClassifierFake::new(logger.clone())),
    };

    let leaf_shield = LeafShield::new(
        config,
        logger,
        device_camera,
        device_display,
        image_classifier,
    );

    leaf_shield.run()
}
