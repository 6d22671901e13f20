// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AnimationTimings, DemoConfig, GridStyle, OscConfig, PathConfig, WindowConfig};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub paths: PathConfig,
    pub osc: OscConfig,
    #[serde(default)]
    pub grid: GridStyle,
    #[serde(default)]
    pub animation: AnimationTimings,
    pub demo: DemoConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    pub fn from_toml(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                    None
                }
            }
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string("config.toml")?;
        Self::from_toml(&content)
    }

    pub fn resolve_data_path(&self) -> PathBuf {
        if Path::new(&self.paths.data_file).is_absolute() {
            PathBuf::from(&self.paths.data_file)
        } else {
            // If path is relative, resolve it relative to the executable or working directory
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .map(|exe_dir| exe_dir.join(&self.paths.data_file))
                .unwrap_or_else(|| PathBuf::from(&self.paths.data_file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [window]
        width = 800
        height = 600

        [paths]
        data_file = "/tmp/matrix.json"

        [osc]
        rx_port = 2000

        [grid]
        cell_size = 30.0
        corner_radius = 3.0

        [demo]
        rows = 4
        columns = 6
    "#;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.osc.rx_port, 2000);
        assert_eq!(config.grid.cell_size, 30.0);
        assert_eq!(config.grid.gap_size, 4.0);
        assert_eq!(config.animation, AnimationTimings::default());
        assert_eq!(config.demo.columns, 6);
    }

    #[test]
    fn test_absolute_data_path_is_kept() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.resolve_data_path(), PathBuf::from("/tmp/matrix.json"));
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(Config::from_toml("[window]\nwidth = 1\nheight = 1").is_err());
    }
}
