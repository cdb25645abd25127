//! Demo configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/logpanel/demo.toml`
//! - Windows: `%APPDATA%/logpanel/demo.toml`

use std::path::{Path, PathBuf};

use logpanel_protocol::PanelOptions;
use serde::{Deserialize, Serialize};

/// Demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Panel layout and capture options.
    #[serde(default)]
    pub panel: PanelOptions,
}

impl Config {
    /// Loads configuration from the default location, creating it if missing.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, writing the defaults there if absent.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("logpanel").join("demo.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("logpanel")
            .join("demo.toml")
    }
}

#[cfg(test)]
mod tests {
    use logpanel_protocol::PanelPosition;

    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.panel.position, PanelPosition::BottomRight);
        assert_eq!(config.panel.width, 400);
        assert_eq!(config.panel.height, 300);
        assert_eq!(config.panel.max_logs, 1000);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = Config {
            panel: PanelOptions {
                position: PanelPosition::TopLeft,
                width: 500,
                height: 250,
                max_logs: 64,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("position = \"top-left\""));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_partial_toml() {
        let toml_str = "[panel]\nmax_logs = 20\n";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.panel.max_logs, 20);
        assert_eq!(config.panel.width, 400);
        assert_eq!(config.panel.position, PanelPosition::BottomRight);
    }

    #[test]
    fn config_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_path_not_empty() {
        assert!(config_path().to_string_lossy().contains("logpanel"));
    }

    #[test]
    fn load_creates_default_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("demo.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.toml");

        let mut config = Config::default();
        config.panel.position = PanelPosition::TopRight;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.panel.position, PanelPosition::TopRight);
    }
}
