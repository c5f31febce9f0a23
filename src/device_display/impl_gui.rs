use crate::captured_image::CapturedImage;
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent};
use crate::leaf_shield::render::View;
use eframe::egui;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

type Subscribers = Arc<Mutex<Vec<Sender<DeviceDisplayEvent>>>>;

fn broadcast(subscribers: &Subscribers, event: DeviceDisplayEvent) {
    if let Ok(subscribers) = subscribers.lock() {
        for subscriber in subscribers.iter() {
            let _ = subscriber.send(event.clone());
        }
    }
}

struct PreviewTexture {
    bytes: Arc<[u8]>,
    texture: Option<egui::TextureHandle>,
}

struct LeafShieldWindow {
    view: Arc<Mutex<Option<View>>>,
    subscribers: Subscribers,
    path_input: String,
    preview: Option<PreviewTexture>,
}

impl LeafShieldWindow {
    fn send(&self, event: DeviceDisplayEvent) {
        broadcast(&self.subscribers, event);
    }

    /// Decodes once per image. Replacing the entry drops the old texture.
    fn preview_texture(
        &mut self,
        ctx: &egui::Context,
        image: &CapturedImage,
    ) -> Option<egui::TextureHandle> {
        let stale = match &self.preview {
            Some(preview) => !Arc::ptr_eq(&preview.bytes, &image.bytes),
            None => true,
        };

        if stale {
            let texture = image::load_from_memory(&image.bytes).ok().map(|decoded| {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                ctx.load_texture("preview", color_image, egui::TextureOptions::default())
            });
            self.preview = Some(PreviewTexture {
                bytes: image.bytes.clone(),
                texture,
            });
        }

        self.preview.as_ref().and_then(|preview| preview.texture.clone())
    }
}

impl eframe::App for LeafShieldWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = match self.view.lock() {
            Ok(view) => view.clone(),
            Err(_) => return,
        };
        let Some(view) = view else {
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        };

        if view.accepts_files {
            let dropped: Option<PathBuf> = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .find_map(|file| file.path.clone())
            });
            if let Some(path) = dropped {
                self.send(DeviceDisplayEvent::FileSelected(path));
            }
        }

        if view.image.is_none() {
            self.preview = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(view.title);
                ui.add_space(12.0);

                if let Some(prompt) = &view.prompt {
                    ui.label(egui::RichText::new(prompt).strong());
                }

                if view.accepts_files {
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.path_input);
                        if ui.button("Open").clicked() && !self.path_input.trim().is_empty() {
                            let path = PathBuf::from(self.path_input.trim());
                            self.send(DeviceDisplayEvent::FileSelected(path));
                        }
                    });
                }

                if let Some(image) = &view.image {
                    match self.preview_texture(ctx, image) {
                        Some(texture) => {
                            ui.add(
                                egui::Image::new((texture.id(), texture.size_vec2()))
                                    .max_height(400.0),
                            );
                        }
                        None => {
                            ui.label(image.describe());
                        }
                    }
                }

                if view.loading {
                    ui.spinner();
                    ui.label("Processing");
                }

                if let Some(result) = &view.result {
                    egui::Grid::new("prediction").striped(true).show(ui, |ui| {
                        ui.strong("Label:");
                        ui.strong("Confidence:");
                        ui.end_row();
                        ui.label(&result.label);
                        ui.label(&result.confidence);
                        ui.end_row();
                    });
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    for control in &view.controls {
                        if ui.button(control.label()).clicked() {
                            self.send(control.event());
                        }
                    }
                });
            });
        });

        // The model changes on other threads.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    view: Arc<Mutex<Option<View>>>,
    subscribers: Subscribers,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(None)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let view = self.view.clone();
        let subscribers = self.subscribers.clone();

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 720.0]),
                ..Default::default()
            };

            let window = LeafShieldWindow {
                view,
                subscribers: subscribers.clone(),
                path_input: String::new(),
                preview: None,
            };

            // Blocks this thread until the window is closed
            let _ = eframe::run_native("LeafShield", options, Box::new(|_cc| Box::new(window)));

            broadcast(&subscribers, DeviceDisplayEvent::Quit);
        });

        Ok(())
    }

    fn draw(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut current = self.view.lock().map_err(|_| "view lock poisoned")?;
        *current = Some(view.clone());
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}
