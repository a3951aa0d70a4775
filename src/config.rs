use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CanvasSize;
use crate::state::EditorSettings;

/// Environment variable naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "COLORING_BOOK_CONFIG";
/// Environment variable overriding [`AppConfig::api_base_url`].
pub const API_URL_ENV: &str = "COLORING_BOOK_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct AppConfig {
    pub api_base_url: String,
    pub canvas: CanvasSize,
    pub sticker_size: f32,
    /// Minimum distance between kept stroke points; 0 keeps every point.
    pub stroke_tolerance: f32,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_owned(),
            canvas: CanvasSize::default(),
            sticker_size: 96.0,
            stroke_tolerance: 0.0,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults, then the file named by [`CONFIG_PATH_ENV`], then [`API_URL_ENV`].
    ///
    /// A broken config file is reported and skipped rather than aborting startup.
    pub fn load() -> Self {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => match Self::from_file(Path::new(&path)) {
                Ok(config) => {
                    info!("loaded config from {}", Path::new(&path).display());
                    config
                }
                Err(err) => {
                    warn!("{err}; using default config");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        config
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            canvas: self.canvas,
            sticker_size: self.sticker_size,
            stroke_tolerance: self.stroke_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "api_base_url": "https://colors.example/api" }"#)
            .unwrap();
        assert_eq!(config.api_base_url, "https://colors.example/api");
        assert_eq!(config.canvas, CanvasSize::default());
        assert_eq!(config.sticker_size, 96.0);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
