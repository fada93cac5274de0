//! Path management for parking configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/parking/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/parking/      # Data directory
//! └── snapshot.json            # Active sessions and history
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "parking";

pub struct ParkingPaths;

impl ParkingPaths {
    /// `<config_dir>/parking`, e.g. `~/.config/parking/` on Linux.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// `<data_dir>/parking`, e.g. `~/.local/share/parking/` on Linux.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Snapshot location used when the config does not name one.
    pub fn default_snapshot_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("snapshot.json"))
    }
}
