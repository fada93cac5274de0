//! Configuration service.
//!
//! Loads the root configuration from `config.toml`
//! (`~/.config/parking/config.toml` unless a path is given). A missing file
//! yields the defaults; a malformed file is an error.

use parking_core::{ParkingConfig, ParkingError, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::ParkingPaths;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: ParkingConfig,
}

impl ConfigService {
    /// Loads the config from the default location.
    pub fn load_default() -> Result<Self> {
        let path = ParkingPaths::config_file().map_err(|e| ParkingError::config(e.to_string()))?;
        Self::load_from(path)
    }

    /// Loads the config from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Self::read(&path)?;
        Ok(Self { path, config })
    }

    fn read(path: &Path) -> Result<ParkingConfig> {
        if !path.exists() {
            tracing::debug!("[Config] {:?} not found, using defaults", path);
            return Ok(ParkingConfig::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ParkingError::config(format!("Failed to parse {:?}: {}", path, e)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ParkingConfig {
        &self.config
    }

    /// Snapshot path from the config, or the platform default.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        match &self.config.snapshot_path {
            Some(path) => Ok(path.clone()),
            None => ParkingPaths::default_snapshot_file()
                .map_err(|e| ParkingError::config(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_core::FeePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::load_from(temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(service.config(), &ParkingConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let snapshot = temp_dir.path().join("lot.json");
        fs::write(
            &path,
            format!(
                "snapshot_path = {:?}\n\n[billing]\nsubscriber_discount_percent = 30\n",
                snapshot.to_string_lossy()
            ),
        )
        .unwrap();

        let service = ConfigService::load_from(&path).unwrap();
        assert_eq!(service.snapshot_path().unwrap(), snapshot);
        assert_eq!(service.config().billing.subscriber_discount_percent, 30);
        assert_eq!(service.config().billing.daily_cap, FeePolicy::default().daily_cap);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "snapshot_path = [").unwrap();

        let err = ConfigService::load_from(&path).unwrap_err();
        assert!(matches!(err, ParkingError::Config(_)));
    }
}
