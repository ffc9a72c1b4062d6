//! Editor and scene configuration.

use crate::shapes::ShapeColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Scene-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Maximum number of undo snapshots to keep (None = unbounded).
    pub max_undo_history: Option<usize>,
}

/// Settings for the interactive editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Arrow-key nudge distance.
    pub nudge_step: i32,
    /// Arrow-key nudge distance with Shift held.
    pub nudge_step_large: i32,
    /// Factor applied by the "grow" command.
    pub scale_up_factor: f64,
    /// Factor applied by the "shrink" command.
    pub scale_down_factor: f64,
    /// Opacity change per keypress.
    pub opacity_step: f64,
    /// Rotation per keypress, in degrees.
    pub rotate_step: f64,
    /// Edge length of newly placed squares.
    pub default_square_size: i32,
    /// Radius of newly placed circles.
    pub default_circle_radius: i32,
    /// Width of newly placed rectangles.
    pub default_rect_width: i32,
    /// Height of newly placed rectangles.
    pub default_rect_height: i32,
    /// Distance from a bounding-box corner that starts a resize.
    pub resize_handle_tolerance: f64,
    /// Color used for new shapes until the user picks another.
    pub default_color: ShapeColor,
    pub scene: SceneConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            nudge_step: 5,
            nudge_step_large: 20,
            scale_up_factor: 1.1,
            scale_down_factor: 0.9,
            opacity_step: 0.1,
            rotate_step: 15.0,
            default_square_size: 100,
            default_circle_radius: 50,
            default_rect_width: 150,
            default_rect_height: 100,
            resize_handle_tolerance: 10.0,
            default_color: ShapeColor::RED,
            scene: SceneConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}
