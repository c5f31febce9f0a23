use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent};
use crate::leaf_shield::render::View;
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

const WIDTH: usize = 56;

pub struct DeviceDisplayConsole {}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn render_lines(view: &View) -> Vec<String> {
    let mut lines = vec![view.title.to_string(), String::new()];

    if let Some(prompt) = &view.prompt {
        lines.push(prompt.clone());
    }

    if let Some(image) = &view.image {
        lines.push(format!("Image: {}", image.describe()));
    }

    if view.loading {
        lines.push("Processing...".to_string());
    }

    if let Some(result) = &view.result {
        lines.push(format!("Label:      {}", result.label));
        lines.push(format!("Confidence: {}", result.confidence));
    }

    let mut commands: Vec<&str> = Vec::new();
    if view.accepts_files {
        commands.push("open <path>");
    }
    commands.extend(view.controls.iter().map(|control| control.command()));
    commands.push("quit");
    lines.push(String::new());
    lines.push(format!("> {}", commands.join(" | ")));

    lines
}

pub fn parse_command(line: &str) -> Option<DeviceDisplayEvent> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "open" if !argument.is_empty() => Some(DeviceDisplayEvent::FileSelected(PathBuf::from(argument))),
        "capture" => Some(DeviceDisplayEvent::CapturePressed),
        "submit" => Some(DeviceDisplayEvent::SubmitPressed),
        "reset" | "clear" | "retake" => Some(DeviceDisplayEvent::ResetPressed),
        "quit" | "exit" => Some(DeviceDisplayEvent::Quit),
        _ => None,
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn draw(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "┌{}┐", "─".repeat(WIDTH))?;
        for line in render_lines(view) {
            let line: String = line.chars().take(WIDTH).collect();
            let padding = WIDTH - line.chars().count();
            writeln!(out, "│{}{}│", line, " ".repeat(padding))?;
        }
        writeln!(out, "└{}┘", "─".repeat(WIDTH))?;
        out.flush()?;
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                    None => eprintln!("Unknown command: {:?}", line.trim()),
                }
            }
            // stdin closed
            let _ = tx.send(DeviceDisplayEvent::Quit);
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captured_image::CapturedImage;
    use crate::leaf_shield::render::{Control, ResultRow, TITLE};

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("open  /tmp/leaf one.jpg "),
            Some(DeviceDisplayEvent::FileSelected(PathBuf::from(
                "/tmp/leaf one.jpg"
            )))
        );
        assert_eq!(parse_command("open"), None);
        assert_eq!(parse_command("capture"), Some(DeviceDisplayEvent::CapturePressed));
        assert_eq!(parse_command("submit"), Some(DeviceDisplayEvent::SubmitPressed));
        assert_eq!(parse_command("clear"), Some(DeviceDisplayEvent::ResetPressed));
        assert_eq!(parse_command("quit"), Some(DeviceDisplayEvent::Quit));
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_render_lines_for_result() {
        let view = View {
            title: TITLE,
            prompt: None,
            image: Some(CapturedImage::new("leaf.jpg", "image/jpeg", vec![1, 2, 3])),
            loading: false,
            result: Some(ResultRow {
                label: "Healthy".to_string(),
                confidence: "87.34%".to_string(),
            }),
            controls: vec![Control::Reset],
            accepts_files: true,
        };

        let lines = render_lines(&view);

        assert!(lines.contains(&"Image: leaf.jpg (image/jpeg)".to_string()));
        assert!(lines.contains(&"Label:      Healthy".to_string()));
        assert!(lines.contains(&"Confidence: 87.34%".to_string()));
        assert!(!lines.contains(&"Processing...".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "> open <path> | reset | quit"
        );
    }
}
