use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_LOGS, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH};

/// Options for a capture buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Maximum number of entries kept; the oldest is evicted first.
    #[serde(default = "default_max_logs", alias = "maxLogs")]
    pub max_logs: usize,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            max_logs: default_max_logs(),
        }
    }
}

/// Screen corner the panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum PanelPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl PanelPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelPosition::TopLeft => "top-left",
            PanelPosition::TopRight => "top-right",
            PanelPosition::BottomLeft => "bottom-left",
            PanelPosition::BottomRight => "bottom-right",
        }
    }
}

/// Unknown positions fall back to the bottom-right corner.
impl From<&str> for PanelPosition {
    fn from(s: &str) -> Self {
        match s {
            "top-left" => PanelPosition::TopLeft,
            "top-right" => PanelPosition::TopRight,
            "bottom-left" => PanelPosition::BottomLeft,
            _ => PanelPosition::BottomRight,
        }
    }
}

impl From<String> for PanelPosition {
    fn from(s: String) -> Self {
        PanelPosition::from(s.as_str())
    }
}

/// Options accepted by the log panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOptions {
    #[serde(default)]
    pub position: PanelPosition,

    /// Panel width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Panel height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_max_logs", alias = "maxLogs")]
    pub max_logs: usize,
}

impl PanelOptions {
    /// Capture options derived from the panel options.
    pub fn capture(&self) -> CaptureOptions {
        CaptureOptions {
            max_logs: self.max_logs,
        }
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            position: PanelPosition::default(),
            width: default_width(),
            height: default_height(),
            max_logs: default_max_logs(),
        }
    }
}

fn default_max_logs() -> usize {
    DEFAULT_MAX_LOGS
}

fn default_width() -> u32 {
    DEFAULT_PANEL_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_PANEL_HEIGHT
}
