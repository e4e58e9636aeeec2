use std::{ops::Not, path::Path, path::PathBuf, time::Duration};

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, store::DEFAULT_TITLE, time_picker::PickerStyle};

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// application settings, alarms themselves are never written here
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_title")]
    pub notification_title: String,
    /// on desktop this is the answer to the startup permission request
    #[serde(default = "always_true")]
    pub notifications_allowed: bool,
    #[serde(default = "always_true")]
    pub play_sound: bool,
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// overrides the style picked for the host platform
    #[serde(default)]
    pub picker: Option<PickerStyle>,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            notification_title: default_title(),
            notifications_allowed: true,
            play_sound: true,
            volume: default_volume(),
            picker: None,
            tick_millis: default_tick_millis(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// if the file can't be read or isn't valid toml
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&config)?)
    }

    /// defaults when there is no file at `path`
    ///
    /// # Errors
    /// if the file exists but can't be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// # Errors
    /// if the config dir can't be created or the file can't be written
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = toml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, config)?;
        Ok(())
    }

    /// # Errors
    /// if the platform has no config directory
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = directories::ProjectDirs::from("", "", "daily_alarms")
            .ok_or(ConfigError::NoConfigDir)?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }

    #[must_use]
    pub fn picker_style(&self) -> PickerStyle {
        self.picker.unwrap_or_else(PickerStyle::for_host)
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

#[inline]
#[must_use]
pub const fn always_true() -> bool {
    true
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

const fn default_volume() -> f32 {
    80.0
}

const fn default_tick_millis() -> u64 {
    500
}
