//! Host configuration resolved from flags and environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use planner::camera::Viewport;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("project path must not be empty")]
    EmptyProjectPath,
}

/// Where the project lives and how large the simulated view is.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub project_path: PathBuf,
    pub viewport: Viewport,
}

impl Config {
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty path or a degenerate viewport.
    pub fn new(project_path: PathBuf, width: f64, height: f64) -> Result<Self, ConfigError> {
        if project_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyProjectPath);
        }
        let viewport = Viewport::new(width, height);
        if viewport.is_degenerate() {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { project_path, viewport })
    }
}
