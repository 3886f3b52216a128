//! Manager configuration

use anyhow::{Context, Result};
use mgrlink_shared::FeatureSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment prefix for overriding configuration keys (e.g. `MGRLINK_STATS_PERIOD`).
pub const ENV_PREFIX: &str = "MGRLINK";

/// Default interval, in seconds, clients are asked to report at.
pub const DEFAULT_STATS_PERIOD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Reporting interval sent to clients without an override. Zero is passed
    /// through to clients unchanged.
    pub stats_period: u32,

    /// Per-client reporting interval, keyed by client name
    pub clients: BTreeMap<String, u32>,

    /// Feature bits assumed for peers when the transport does not supply them
    pub target_features: FeatureSet,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            stats_period: DEFAULT_STATS_PERIOD,
            clients: BTreeMap::new(),
            target_features: FeatureSet::empty(),
        }
    }
}

impl ManagerConfig {
    /// Load from an optional TOML file, then apply `MGRLINK_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`ManagerConfig::load`] with a custom environment prefix.
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix).try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to read manager configuration")?
            .try_deserialize()
            .context("Invalid manager configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.clients.keys().find(|name| name.trim().is_empty()) {
            anyhow::bail!("Client override with empty name: {:?}", name);
        }
        Ok(())
    }

    /// Reporting interval for `client`: its override, or the default period.
    pub fn stats_period_for(&self, client: &str) -> u32 {
        self.clients
            .get(client)
            .copied()
            .unwrap_or(self.stats_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.stats_period, 5);
        assert!(config.clients.is_empty());
        assert_eq!(config.target_features, FeatureSet::empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stats_period_for_override() {
        let mut config = ManagerConfig::default();
        config.clients.insert("client-a".to_string(), 30);
        assert_eq!(config.stats_period_for("client-a"), 30);
        assert_eq!(config.stats_period_for("client-b"), 5);
    }

    #[test]
    fn test_zero_period_is_valid() {
        let mut config = ManagerConfig::default();
        config.stats_period = 0;
        config.clients.insert("quiet".to_string(), 0);
        assert!(config.validate().is_ok());
        assert_eq!(config.stats_period_for("quiet"), 0);
    }

    #[test]
    fn test_empty_client_name_rejected() {
        let mut config = ManagerConfig::default();
        config.clients.insert("  ".to_string(), 10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        let config = ManagerConfig::load_with_prefix(None, "MGRLINK_TEST_NOTHING").unwrap();
        assert_eq!(config, ManagerConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            "stats_period = 12\ntarget_features = 3\n\n[clients]\nclient-a = 60\nclient-b = 0"
        )?;

        let config = ManagerConfig::load_with_prefix(Some(file.path()), "MGRLINK_TEST_FILE")?;
        assert_eq!(config.stats_period, 12);
        assert_eq!(config.target_features, FeatureSet::from_bits(3));
        assert_eq!(config.stats_period_for("client-a"), 60);
        assert_eq!(config.stats_period_for("client-b"), 0);
        Ok(())
    }

    #[test]
    fn test_env_overrides_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "stats_period = 12")?;
        std::env::set_var("MGRLINK_TEST_ENV_STATS_PERIOD", "45");

        let config = ManagerConfig::load_with_prefix(Some(file.path()), "MGRLINK_TEST_ENV")?;
        assert_eq!(config.stats_period, 45);
        Ok(())
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ManagerConfig::load_with_prefix(
            Some(Path::new("/nonexistent/mgrlink.toml")),
            "MGRLINK_TEST_MISSING",
        );
        assert!(result.is_err());
    }
}
