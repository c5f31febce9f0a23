use crate::captured_image::CapturedImage;
use crate::config::{ClientKind, Config};
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent};
use crate::leaf_shield::core::{Model, Screen};
use std::sync::{Arc, Mutex};

pub const TITLE: &str = "LeafShield: Plant Disease Classification";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Capture,
    Submit,
    Reset,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::Capture => "Capture",
            Control::Submit => "Submit",
            Control::Reset => "Clear",
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            Control::Capture => "capture",
            Control::Submit => "submit",
            Control::Reset => "reset",
        }
    }

    pub fn event(&self) -> DeviceDisplayEvent {
        match self {
            Control::Capture => DeviceDisplayEvent::CapturePressed,
            Control::Submit => DeviceDisplayEvent::SubmitPressed,
            Control::Reset => DeviceDisplayEvent::ResetPressed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub confidence: String,
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: &'static str,
    pub prompt: Option<String>,
    pub image: Option<CapturedImage>,
    pub loading: bool,
    pub result: Option<ResultRow>,
    pub controls: Vec<Control>,
    pub accepts_files: bool,
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

pub fn view(config: &Config, model: &Model) -> View {
    let prompt = match (&model.screen, config.client) {
        (Screen::Idle, ClientKind::Web) => {
            Some("Drag and drop an image of plant leaf to process".to_string())
        }
        (Screen::Idle, ClientKind::Mobile) => {
            Some("Press capture to photograph a plant leaf".to_string())
        }
        _ => None,
    };

    let loading =
        config.client == ClientKind::Web && matches!(model.screen, Screen::Predicting { .. });

    let result = model.screen.result().map(|result| ResultRow {
        label: result.predicted_class.clone(),
        confidence: format_confidence(result.confidence),
    });

    let controls = match (&model.screen, config.client) {
        (Screen::Idle, ClientKind::Mobile) => vec![Control::Capture],
        (Screen::Idle, ClientKind::Web) => vec![],
        (Screen::Previewing { .. }, _) if !config.predict_on_acquire => {
            vec![Control::Submit, Control::Reset]
        }
        _ => vec![Control::Reset],
    };

    View {
        title: TITLE,
        prompt,
        image: model.screen.image().cloned(),
        loading,
        result,
        controls,
        accepts_files: config.client == ClientKind::Web,
    }
}

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
}

impl Render {
    pub fn new(
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        config: Config,
    ) -> Self {
        Self {
            device_display,
            config,
        }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let view = view(&self.config, model);

        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "display lock poisoned")?;

        device_display.draw(&view)
    }
}
