use crate::leaf_shield::render::View;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// User input coming back from whatever surface shows the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceDisplayEvent {
    FileSelected(PathBuf),
    CapturePressed,
    SubmitPressed,
    ResetPressed,
    Quit,
}

pub trait DeviceDisplay: Send + Sync {
    /// Bring up the surface. Called once before the first draw.
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace whatever is shown with `view`.
    fn draw(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Each call returns a new subscription to user input.
    fn events(&self) -> Receiver<DeviceDisplayEvent>;
}
