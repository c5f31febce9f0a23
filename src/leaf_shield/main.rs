use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent};
use crate::image_classifier::interface::ImageClassifier;
use crate::leaf_shield::core::{init, transition, Effect, Model, Msg};
use crate::leaf_shield::render::Render;
use crate::leaf_shield::run_effect::RunEffect;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LeafShield {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    #[allow(dead_code)]
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    render: Render,
    run_effect: RunEffect,
}

impl LeafShield {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let logger = logger.with_namespace("leaf_shield");

        Self {
            render: Render::new(device_display.clone(), config.clone()),
            run_effect: RunEffect::new(
                config.clone(),
                logger.clone(),
                device_camera,
                device_display,
                image_classifier,
                msg_sender.clone(),
            ),
            config,
            logger,
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut model, effects) = init(&self.config);

        self.render.render(&model)?;
        self.spawn_effects(effects);

        loop {
            let msg = self.recv()?;

            if matches!(msg, Msg::DisplayEvent(DeviceDisplayEvent::Quit)) {
                let _ = self.logger.info("Quit requested, shutting down");
                return Ok(());
            }

            model = self.update(model, msg)?;
        }
    }

    /// One step: transition, render, then fire effects. Rendering first
    /// guarantees the preview is on screen before any request goes out.
    pub fn update(
        &self,
        model: Model,
        msg: Msg,
    ) -> Result<Model, Box<dyn std::error::Error + Send + Sync>> {
        match &msg {
            Msg::PredictDone { request, .. } if !model.is_awaiting(*request) => {
                let _ = self.logger.info(&format!(
                    "Discarding response for superseded request {}",
                    request.0
                ));
            }
            Msg::AcquireDone { acquisition, .. }
                if !model.is_awaiting_acquisition(*acquisition) =>
            {
                let _ = self.logger.info(&format!(
                    "Discarding superseded acquisition {}",
                    acquisition.0
                ));
            }
            _ => {}
        }

        let _ = self.logger.info(&format!(
            "\nold model:\n\t{:?}\n\nmsg:\n\t{:?}",
            model, msg,
        ));

        let (new_model, effects) = transition(&self.config, model, msg);

        let _ = self.logger.info(&format!(
            "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
            new_model, effects
        ));

        self.render.render(&new_model)?;
        self.spawn_effects(effects);

        Ok(new_model)
    }

    fn recv(&self) -> Result<Msg, Box<dyn std::error::Error + Send + Sync>> {
        let receiver = self
            .msg_receiver
            .lock()
            .map_err(|_| "message receiver lock poisoned")?;
        Ok(receiver.recv()?)
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }
}
