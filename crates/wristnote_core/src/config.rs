//! Runtime tunables for the notification pipeline.
//!
//! # Responsibility
//! - Provide device defaults matching the 240x240 reference display.
//! - Load overrides from a JSON document.
//!
//! # Invariants
//! - A validated config always yields non-zero page metrics.

use crate::app::notification_app::CALL_BODY_TOP_PX;
use crate::pager::text_pager::PageMetrics;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Physical height of the reference display in pixels.
pub const SCREEN_HEIGHT_PX: u32 = 240;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Notification pipeline settings. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Haptic pulse length on delivery and for each ring of a call.
    pub notify_duration_ms: u32,
    /// Period of the ringing pulse while a call is foregrounded.
    pub ring_interval_ms: u32,
    pub display_width_px: u32,
    pub lines_per_page: usize,
    pub line_height_px: u32,
    /// Lowest y at which a notification body line may still start.
    pub bottom_margin_px: u32,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            notify_duration_ms: 500,
            ring_interval_ms: 1000,
            display_width_px: 240,
            lines_per_page: 9,
            line_height_px: 24,
            bottom_margin_px: 216,
        }
    }
}

impl NotifyConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// # Errors
    /// - Returns `Invalid` for zero width, zero lines per page, zero line
    ///   height, or a bottom margin that leaves no body line under the call
    ///   header.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.display_width_px == 0 {
            return Err(ConfigError::Invalid(
                "display_width_px must be greater than 0".to_string(),
            ));
        }
        if self.lines_per_page == 0 {
            return Err(ConfigError::Invalid(
                "lines_per_page must be greater than 0".to_string(),
            ));
        }
        if self.line_height_px == 0 {
            return Err(ConfigError::Invalid(
                "line_height_px must be greater than 0".to_string(),
            ));
        }
        if i64::from(self.bottom_margin_px) < i64::from(CALL_BODY_TOP_PX)
            || self.bottom_margin_px >= SCREEN_HEIGHT_PX
        {
            return Err(ConfigError::Invalid(format!(
                "bottom_margin_px must be in {CALL_BODY_TOP_PX}..{SCREEN_HEIGHT_PX}, got {}",
                self.bottom_margin_px
            )));
        }
        Ok(())
    }

    pub fn page_metrics(&self) -> PageMetrics {
        PageMetrics {
            width_px: self.display_width_px,
            lines_per_page: self.lines_per_page,
            line_height_px: self.line_height_px,
        }
    }
}
