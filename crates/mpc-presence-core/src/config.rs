use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::PresenceError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub player: PlayerConfig,
    pub presentation: PresentationConfig,
}

/// Where and how often to poll the player's web interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub port: u16,
    pub poll_interval: u64,
}

/// Cosmetic toggles applied to the presented filename, plus the
/// timestamp mode shown while playing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub replace_underscores: bool,
    pub strip_brackets: bool,
    pub replace_dots: bool,
    pub strip_extension: bool,
    pub show_remaining_time: bool,
}

impl AppConfig {
    /// Load config: the user file if it exists, built-in defaults otherwise.
    pub fn load() -> Result<Self, PresenceError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, PresenceError> {
        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            toml::from_str(&user_str).map_err(|e| PresenceError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), PresenceError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PresenceError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Reject values the poll loop cannot run with.
    pub fn validate(&self) -> Result<(), PresenceError> {
        if self.player.port == 0 {
            return Err(PresenceError::Config("player.port must be non-zero".into()));
        }
        if self.player.poll_interval == 0 {
            return Err(PresenceError::Config(
                "player.poll_interval must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "mpc-presence")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
