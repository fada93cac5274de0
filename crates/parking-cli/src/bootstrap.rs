//! Startup: configuration, logging and opening the service.

use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_application::ParkingService;
use parking_infrastructure::{ConfigService, JsonSnapshotRepository};
use tracing_subscriber::EnvFilter;

pub type Service = ParkingService<JsonSnapshotRepository>;

pub struct Bootstrap {
    config: ConfigService,
    snapshot_path: PathBuf,
}

impl Bootstrap {
    /// Resolves the config file and snapshot path. Flags win over the config file.
    pub fn new(config_path: Option<PathBuf>, snapshot_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigService::load_from(path),
            None => ConfigService::load_default(),
        }
        .context("Failed to load configuration")?;

        let snapshot_path = match snapshot_path {
            Some(path) => path,
            None => config
                .snapshot_path()
                .context("Failed to resolve snapshot path")?,
        };

        Ok(Self {
            config,
            snapshot_path,
        })
    }

    /// `RUST_LOG` wins, then the config's `log_level`, then `warn`.
    pub fn init_tracing(&self) {
        let fallback = self.config.config().log_level.as_deref().unwrap_or("warn");
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();

        tracing::debug!(
            "[Bootstrap] config={:?} snapshot={:?}",
            self.config.path(),
            self.snapshot_path
        );
    }

    /// Loads the snapshot. A corrupt snapshot aborts startup.
    pub fn open_service(&self) -> Result<Service> {
        let repository = JsonSnapshotRepository::new(self.snapshot_path.clone());
        let service = ParkingService::open(repository)
            .with_context(|| format!("Failed to open snapshot {}", self.snapshot_path.display()))?;

        tracing::info!(
            "[Bootstrap] Opened {} with {} parked vehicle(s)",
            self.snapshot_path.display(),
            service.active_sessions().count()
        );
        Ok(service.with_policy(self.config.config().billing))
    }
}
