//! Scene configuration: defaults, optional JSON file, validation.
//!
//! Hosts start from [`SceneConfig::default`] or [`SceneConfig::load`] and then
//! apply their command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial window inner size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub camera_position: [f32; 3],
    /// Fraction of pending orbit motion applied per frame, in (0, 1].
    pub damping_factor: f32,
    pub max_pixel_ratio: f32,
    /// Image used as the cube's texture. Missing files render untextured.
    pub texture: PathBuf,
    pub slider_min: f32,
    pub slider_max: f32,
    pub slider_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov_degrees: 55.0,
            camera_position: [0.0, 0.0, 6.0],
            damping_factor: 0.1,
            max_pixel_ratio: 2.0,
            texture: PathBuf::from("textures/js-logo.png"),
            slider_min: -30.0,
            slider_max: 30.0,
            slider_step: 0.1,
        }
    }
}

impl SceneConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "damping_factor must be in (0, 1], got {}",
                self.damping_factor
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if self.max_pixel_ratio <= 0.0 {
            return Err(ConfigError::Invalid("max_pixel_ratio must be positive".into()));
        }
        if self.slider_min >= self.slider_max || self.slider_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slider range [{}, {}] step {} is empty",
                self.slider_min, self.slider_max, self.slider_step
            )));
        }
        Ok(())
    }

    /// Key the cube material uses to look up its texture.
    pub fn texture_key(&self) -> String {
        self.texture.display().to_string()
    }
}
