//! Configuration system for recall-trace
//!
//! Layered YAML configuration: built-in defaults, the root config file, then
//! environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, ReportConfig, ServiceConfig};

/// Every settable key, in display order
pub const CONFIG_KEYS: [&str; 4] = [
    "service.baseUrl",
    "service.timeout",
    "service.tokenEnv",
    "report.maxTracedItems",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "service.baseUrl" => Ok(config.service.base_url.clone().unwrap_or_default()),
        "service.timeout" => Ok(config.service.timeout.clone()),
        "service.tokenEnv" => Ok(config.service.token_env.clone().unwrap_or_default()),
        "report.maxTracedItems" => Ok(config.report.max_traced_items.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// An empty value clears optional keys.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "service.baseUrl" => {
            if value.is_empty() {
                config.service.base_url = None;
            } else {
                url::Url::parse(value).context("service.baseUrl must be a valid URL")?;
                config.service.base_url = Some(value.to_string());
            }
        }
        "service.timeout" => {
            crate::services::http::parse_duration(value)
                .context("service.timeout must look like '30s', '2m' or '500ms'")?;
            config.service.timeout = value.to_string();
        }
        "service.tokenEnv" => {
            if value.is_empty() {
                config.service.token_env = None;
            } else {
                config.service.token_env = Some(value.to_string());
            }
        }
        "report.maxTracedItems" => {
            let max: usize = value
                .parse()
                .context("report.maxTracedItems must be a number")?;
            if max == 0 {
                return Err(anyhow::anyhow!("report.maxTracedItems must be at least 1"));
            }
            config.report.max_traced_items = max;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
