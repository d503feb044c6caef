//! Configuration loading and layering
//!
//! Handles loading configuration from the root file and environment and
//! layering them over the built-in defaults.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Keys missing from the file take their default values.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the effective configuration
    ///
    /// Fails on invalid YAML, unparseable values, and a zero item limit.
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load configuration")?;
        Self::check(&config)
    }

    /// Check the values of a loaded configuration
    pub fn check(config: &Config) -> Result<()> {
        crate::services::http::parse_duration(&config.service.timeout)
            .with_context(|| format!("Invalid service.timeout: {}", config.service.timeout))?;

        if let Some(base_url) = &config.service.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid service.baseUrl: {}", base_url))?;
        }

        if config.report.max_traced_items == 0 {
            anyhow::bail!("report.maxTracedItems must be at least 1");
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // RECALL_TRACE_BASE_URL override
        if let Ok(base_url) = std::env::var("RECALL_TRACE_BASE_URL") {
            config.service.base_url = Some(base_url);
        }

        // RECALL_TRACE_TIMEOUT override
        if let Ok(timeout) = std::env::var("RECALL_TRACE_TIMEOUT") {
            config.service.timeout = timeout;
        }

        // RECALL_TRACE_MAX_ITEMS override
        if let Ok(max) = std::env::var("RECALL_TRACE_MAX_ITEMS") {
            match max.parse::<usize>() {
                Ok(0) => tracing::warn!("Ignoring RECALL_TRACE_MAX_ITEMS=0, must be at least 1"),
                Ok(val) => config.report.max_traced_items = val,
                Err(_) => tracing::warn!("Ignoring non-numeric RECALL_TRACE_MAX_ITEMS: {}", max),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
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
