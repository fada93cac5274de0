//! Root configuration model, read from `config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::billing::FeePolicy;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParkingConfig {
    /// Where the snapshot lives. Defaults to the platform data directory.
    pub snapshot_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// Tariff overrides; missing keys keep the posted tariff.
    pub billing: FeePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: ParkingConfig = toml::from_str("").unwrap();
        assert_eq!(config, ParkingConfig::default());
        assert_eq!(config.billing, FeePolicy::default());
    }

    #[test]
    fn test_partial_billing_override() {
        let config: ParkingConfig = toml::from_str(
            r#"
            snapshot_path = "/tmp/parking.json"
            log_level = "debug"

            [billing]
            daily_cap = 15000
            "#,
        )
        .unwrap();

        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/parking.json")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.billing.daily_cap, 15000);
        assert_eq!(config.billing.base_fee, 5000);
    }
}
