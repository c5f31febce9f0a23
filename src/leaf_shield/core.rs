use crate::captured_image::{AcquireError, CapturedImage};
use crate::config::{ClientKind, Config};
use crate::device_display::interface::DeviceDisplayEvent;
use crate::image_classifier::interface::{PredictError, PredictionResult};
use std::path::PathBuf;

/// Identifies one issued prediction request. Responses carrying any other
/// token than the one currently awaited are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(pub u64);

/// Identifies one file load or camera capture. Only the latest one started
/// since the last reset may land on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireToken(pub u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Idle,
    Previewing {
        image: CapturedImage,
    },
    Predicting {
        image: CapturedImage,
        request: RequestToken,
    },
    Resolved {
        image: CapturedImage,
        result: PredictionResult,
    },
}

impl Screen {
    pub fn image(&self) -> Option<&CapturedImage> {
        match self {
            Screen::Idle => None,
            Screen::Previewing { image }
            | Screen::Predicting { image, .. }
            | Screen::Resolved { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Screen::Resolved { result, .. } => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub requests_issued: u64,
    pub acquisitions_issued: u64,
    /// The one acquisition whose result will be applied. Cleared on reset.
    pub awaiting_acquisition: Option<AcquireToken>,
    pub screen: Screen,
}

impl Model {
    pub fn is_awaiting(&self, request: RequestToken) -> bool {
        matches!(self.screen, Screen::Predicting { request: current, .. } if current == request)
    }

    pub fn is_awaiting_acquisition(&self, acquisition: AcquireToken) -> bool {
        self.awaiting_acquisition == Some(acquisition)
    }

    fn start_acquisition(self) -> (Self, AcquireToken) {
        let acquisition = AcquireToken(self.acquisitions_issued + 1);
        (
            Self {
                acquisitions_issued: acquisition.0,
                awaiting_acquisition: Some(acquisition),
                ..self
            },
            acquisition,
        )
    }
}

#[derive(Debug)]
pub enum Msg {
    DisplayEvent(DeviceDisplayEvent),
    AcquireDone {
        acquisition: AcquireToken,
        result: Result<CapturedImage, AcquireError>,
    },
    PredictDone {
        request: RequestToken,
        result: Result<PredictionResult, PredictError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToDisplayEvents,
    CheckService,
    LoadFile {
        path: PathBuf,
        acquisition: AcquireToken,
    },
    CaptureImage {
        acquisition: AcquireToken,
    },
    SaveCapture {
        image: CapturedImage,
    },
    PredictImage {
        image: CapturedImage,
        request: RequestToken,
    },
}

pub fn init(_config: &Config) -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SubscribeToDisplayEvents, Effect::CheckService],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        // Acquisition
        Msg::DisplayEvent(DeviceDisplayEvent::FileSelected(path))
            if config.client == ClientKind::Web =>
        {
            // Supersedes any load still in progress.
            let (model, acquisition) = model.start_acquisition();
            (model, vec![Effect::LoadFile { path, acquisition }])
        }
        Msg::DisplayEvent(DeviceDisplayEvent::CapturePressed)
            if config.client == ClientKind::Mobile
                && model.screen == Screen::Idle
                && model.awaiting_acquisition.is_none() =>
        {
            let (model, acquisition) = model.start_acquisition();
            (model, vec![Effect::CaptureImage { acquisition }])
        }
        Msg::AcquireDone {
            acquisition,
            result,
        } if model.is_awaiting_acquisition(acquisition) => {
            let model = Model {
                awaiting_acquisition: None,
                ..model
            };
            match result {
                Ok(image) => acquired(config, model, image),
                Err(_) => (model, vec![]),
            }
        }

        // Manual submit
        Msg::DisplayEvent(DeviceDisplayEvent::SubmitPressed) if !config.predict_on_acquire => {
            match model.screen {
                Screen::Previewing { image } => {
                    let request = RequestToken(model.requests_issued + 1);
                    (
                        Model {
                            requests_issued: request.0,
                            screen: Screen::Predicting {
                                image: image.clone(),
                                request,
                            },
                            ..model
                        },
                        vec![Effect::PredictImage { image, request }],
                    )
                }
                screen => (Model { screen, ..model }, vec![]),
            }
        }

        // Prediction outcome
        Msg::PredictDone { request, result } if model.is_awaiting(request) => {
            let screen = match (model.screen, result) {
                (Screen::Predicting { image, .. }, Ok(result)) => Screen::Resolved { image, result },
                (Screen::Predicting { image, .. }, Err(_)) => Screen::Previewing { image },
                (screen, _) => screen,
            };
            (Model { screen, ..model }, vec![])
        }

        // Reset
        Msg::DisplayEvent(DeviceDisplayEvent::ResetPressed) => (
            Model {
                awaiting_acquisition: None,
                screen: Screen::Idle,
                ..model
            },
            vec![],
        ),

        // Stale results, input not valid here
        _ => (model, vec![]),
    }
}

fn acquired(config: &Config, model: Model, image: CapturedImage) -> (Model, Vec<Effect>) {
    let mut effects = vec![];

    if config.client == ClientKind::Mobile && config.capture_save_dir.is_some() {
        effects.push(Effect::SaveCapture {
            image: image.clone(),
        });
    }

    if config.predict_on_acquire {
        let request = RequestToken(model.requests_issued + 1);
        effects.push(Effect::PredictImage {
            image: image.clone(),
            request,
        });
        (
            Model {
                requests_issued: request.0,
                screen: Screen::Predicting { image, request },
                ..model
            },
            effects,
        )
    } else {
        (
            Model {
                screen: Screen::Previewing { image },
                ..model
            },
            effects,
        )
    }
}
