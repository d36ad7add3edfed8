use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_ZOOM_STEPS, DEFAULT_PROGRESS_STEP, DEFAULT_ZOOM_IN_FACTOR,
    DEFAULT_ZOOM_OUT_FACTOR,
};
use crate::error::{FitscubeError, Result};

/// What to do when a directory is selected while another one is still loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Refuse the new load until the current one finishes.
    Reject,
    /// Cancel the running load and start the new one.
    #[default]
    Restart,
}

impl std::fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "Reject"),
            Self::Restart => write!(f, "Restart"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Minimum percentage change between two progress events (1-100).
    pub progress_step: u8,
    /// Sort directory entries by file name instead of enumeration order.
    pub sort_entries: bool,
    pub load_policy: LoadPolicy,
    pub max_zoom_steps: i32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub default_contrast: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            progress_step: DEFAULT_PROGRESS_STEP,
            sort_entries: false,
            load_policy: LoadPolicy::default(),
            max_zoom_steps: DEFAULT_MAX_ZOOM_STEPS,
            zoom_in_factor: DEFAULT_ZOOM_IN_FACTOR,
            zoom_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            default_contrast: 0,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.progress_step) {
            return Err(FitscubeError::Config(format!(
                "progress_step must be in 1..=100, got {}",
                self.progress_step
            )));
        }
        if self.max_zoom_steps < 1 {
            return Err(FitscubeError::Config(format!(
                "max_zoom_steps must be positive, got {}",
                self.max_zoom_steps
            )));
        }
        if !(self.zoom_in_factor > 1.0) {
            return Err(FitscubeError::Config(format!(
                "zoom_in_factor must be > 1, got {}",
                self.zoom_in_factor
            )));
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(FitscubeError::Config(format!(
                "zoom_out_factor must be in (0, 1), got {}",
                self.zoom_out_factor
            )));
        }
        Ok(())
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| FitscubeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FitscubeError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
