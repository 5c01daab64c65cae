use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use spiwave_core::SpiConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_speed")]
    pub speed_hz: u32,
    #[serde(default)]
    pub mode: u8,
    #[serde(default = "default_capture_limit")]
    pub capture_limit: usize,
}

fn default_speed() -> u32 {
    SpiConfig::default().speed_hz
}

fn default_capture_limit() -> usize {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed_hz: default_speed(),
            mode: SpiConfig::default().mode,
            capture_limit: default_capture_limit(),
        }
    }
}

impl Settings {
    /// `<config_dir>/spiwave/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spiwave").join("settings.json"))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    /// Explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                log::debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn spi_config(&self) -> SpiConfig {
        SpiConfig::new(self.speed_hz, self.mode)
    }
}
