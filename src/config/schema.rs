//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Trace service connection
    #[serde(default)]
    pub service: ServiceConfig,

    /// Report generation
    #[serde(default)]
    pub report: ReportConfig,
}

/// Trace service connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Base URL of the trace service API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout (e.g., "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Environment variable holding a bearer token; null disables auth
    #[serde(default = "default_token_env")]
    pub token_env: Option<String>,
}

/// Report generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    /// Largest number of lots and serials one request may trace
    #[serde(default = "default_max_traced_items")]
    pub max_traced_items: usize,
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_token_env() -> Option<String> {
    Some("RECALL_TRACE_TOKEN".to_string())
}

fn default_max_traced_items() -> usize {
    crate::services::DEFAULT_MAX_TRACED_ITEMS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
            token_env: default_token_env(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_traced_items: default_max_traced_items(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "service:\n  baseUrl: https://trace.example.com/api\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            config.service.base_url.as_deref(),
            Some("https://trace.example.com/api")
        );
        assert_eq!(config.service.timeout, "30s");
        assert_eq!(config.service.token_env.as_deref(), Some("RECALL_TRACE_TOKEN"));
        assert_eq!(config.report.max_traced_items, 50);
    }

    #[test]
    fn test_serializes_camel_case() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("maxTracedItems: 50"));
        assert!(yaml.contains("tokenEnv: RECALL_TRACE_TOKEN"));
        assert!(!yaml.contains("baseUrl"));
    }
}
