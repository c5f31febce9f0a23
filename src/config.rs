use chrono::{Offset, Utc};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_WEB_PREDICT_URL: &str = "http://localhost:8000/predict";
const DEFAULT_MOBILE_PREDICT_URL: &str = "http://192.168.0.10:8000/predict";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// File selection with a loading indicator.
    Web,
    /// Camera shutter, no loading indicator.
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Http,
    Fake,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?} (expected {expected})")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientKind,
    pub display: DisplayKind,
    pub classifier: ClassifierKind,
    pub predict_url: String,
    pub request_timeout: Option<Duration>,
    pub predict_on_acquire: bool,
    pub capture_save_dir: Option<PathBuf>,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientKind::Web,
            display: DisplayKind::Console,
            classifier: ClassifierKind::Http,
            predict_url: default_predict_url(ClientKind::Web),
            request_timeout: None,
            predict_on_acquire: true,
            capture_save_dir: None,
            logger_timezone: Utc.fix(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = match lookup("LEAF_SHIELD_CLIENT").as_deref() {
            None | Some("web") => ClientKind::Web,
            Some("mobile") => ClientKind::Mobile,
            Some(other) => return Err(invalid("LEAF_SHIELD_CLIENT", other, "web or mobile")),
        };

        let display = match lookup("LEAF_SHIELD_DISPLAY").as_deref() {
            None | Some("console") => DisplayKind::Console,
            Some("gui") => DisplayKind::Gui,
            Some(other) => return Err(invalid("LEAF_SHIELD_DISPLAY", other, "console or gui")),
        };

        let classifier = match lookup("LEAF_SHIELD_CLASSIFIER").as_deref() {
            None | Some("http") => ClassifierKind::Http,
            Some("fake") => ClassifierKind::Fake,
            Some(other) => return Err(invalid("LEAF_SHIELD_CLASSIFIER", other, "http or fake")),
        };

        let predict_url = lookup("LEAF_SHIELD_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| default_predict_url(client));

        let request_timeout = match lookup("LEAF_SHIELD_TIMEOUT_SECS") {
            None => None,
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(invalid(
                        "LEAF_SHIELD_TIMEOUT_SECS",
                        &value,
                        "a positive number of seconds",
                    ))
                }
            },
        };

        let predict_on_acquire = match lookup("LEAF_SHIELD_PREDICT_ON_ACQUIRE").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(invalid(
                    "LEAF_SHIELD_PREDICT_ON_ACQUIRE",
                    other,
                    "true or false",
                ))
            }
        };

        let capture_save_dir = lookup("LEAF_SHIELD_SAVE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let logger_timezone = match lookup("LEAF_SHIELD_UTC_OFFSET_HOURS") {
            None => Utc.fix(),
            Some(value) => value
                .parse::<i32>()
                .ok()
                .and_then(|hours| hours.checked_mul(3600))
                .and_then(chrono::FixedOffset::east_opt)
                .ok_or_else(|| {
                    invalid(
                        "LEAF_SHIELD_UTC_OFFSET_HOURS",
                        &value,
                        "whole hours between -23 and 23",
                    )
                })?,
        };

        Ok(Self {
            client,
            display,
            classifier,
            predict_url,
            request_timeout,
            predict_on_acquire,
            capture_save_dir,
            logger_timezone,
        })
    }
}

fn default_predict_url(client: ClientKind) -> String {
    match client {
        ClientKind::Web => option_env!("LEAF_SHIELD_API_URL")
            .unwrap_or(DEFAULT_WEB_PREDICT_URL)
            .to_string(),
        ClientKind::Mobile => DEFAULT_MOBILE_PREDICT_URL.to_string(),
    }
}

fn invalid(name: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        expected,
    }
}
