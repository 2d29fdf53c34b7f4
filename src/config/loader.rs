//! Configuration loading and layering
//!
//! Precedence (highest to lowest): environment variables, the root config
//! file, built-in defaults.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `gateway.baseUrl`
pub const ENV_BASE_URL: &str = "GATE9S_BASE_URL";
/// Environment variable overriding `gateway.timeout`
pub const ENV_TIMEOUT: &str = "GATE9S_TIMEOUT";
/// Environment variable overriding `ui.pageSize`
pub const ENV_PAGE_SIZE: &str = "GATE9S_PAGE_SIZE";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        Ok(Self::apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file and the merged result
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load merged configuration")?;
        Self::validate_config(&config)
    }

    /// Check values that parse as YAML but are not usable
    pub fn validate_config(config: &Config) -> Result<()> {
        url::Url::parse(&config.gateway.base_url)
            .with_context(|| format!("gateway.baseUrl is not a URL: {}", config.gateway.base_url))?;

        let timeout = config.timeout()?;
        if timeout.is_zero() {
            anyhow::bail!("gateway.timeout must be greater than zero");
        }

        let intervals = config.poll_intervals()?;
        if intervals.metrics.is_zero() || intervals.server_log.is_zero() {
            anyhow::bail!("refresh intervals must be greater than zero");
        }

        if config.ui.page_size == 0 {
            anyhow::bail!("ui.pageSize must be at least 1");
        }

        if config.logger.buffer == 0 {
            anyhow::bail!("logger.buffer must be at least 1");
        }

        config.default_view()?;
        Ok(())
    }

    /// Apply environment overrides looked up through `lookup`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.gateway.base_url = base_url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            config.gateway.timeout = timeout;
        }

        if let Some(page_size) = lookup(ENV_PAGE_SIZE) {
            match page_size.parse() {
                Ok(size) => config.ui.page_size = size,
                Err(_) => tracing::warn!("Ignoring {}={}: not a number", ENV_PAGE_SIZE, page_size),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://gw:9000"),
            (ENV_TIMEOUT, "5s"),
            (ENV_PAGE_SIZE, "25"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.gateway.base_url, "http://gw:9000");
        assert_eq!(config.gateway.timeout, "5s");
        assert_eq!(config.ui.page_size, 25);
    }

    #[test]
    fn test_bad_page_size_override_is_ignored() {
        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            (key == ENV_PAGE_SIZE).then(|| "lots".to_string())
        });
        assert_eq!(config.ui.page_size, 10);
    }

    #[test]
    fn test_save_and_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.refresh.coalesce = true;
        config.ui.page_size = 6;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let loaded = ConfigLoader::load_file(tmp.path()).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_validate_config() {
        assert!(ConfigLoader::validate_config(&Config::default()).is_ok());

        let mut config = Config::default();
        config.refresh.server_log_interval = "0s".to_string();
        assert!(ConfigLoader::validate_config(&config).is_err());

        let mut config = Config::default();
        config.gateway.base_url = "not a url".to_string();
        assert!(ConfigLoader::validate_config(&config).is_err());
    }
}
