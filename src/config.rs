use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    // node rpc address: eg: http://127.0.0.1:8732
    #[serde(default = "default_url")]
    pub url: String,

    // connect timeout between client and node
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    // overall timeout of a single request, body included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:8732".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

/// network log streaming configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    // the log stream is cut after this many seconds
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

fn default_max_duration_secs() -> u64 {
    60
}

pub fn parse(content: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.node.url, "http://127.0.0.1:8732");
        assert_eq!(cfg.node.connect_timeout_secs, 5);
        assert_eq!(cfg.node.timeout_secs, 30);
        assert_eq!(cfg.log.max_duration_secs, 60);
    }

    #[test]
    fn test_partial_config() {
        let cfg = parse(
            r#"
            [node]
            url = "http://node.local:18732"
            timeout_secs = 10

            [log]
            max_duration_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.node.url, "http://node.local:18732");
        assert_eq!(cfg.node.connect_timeout_secs, 5);
        assert_eq!(cfg.node.timeout_secs, 10);
        assert_eq!(cfg.log.max_duration_secs, 5);
    }

    #[test]
    fn test_invalid_config() {
        assert!(parse("[node]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load("/nonexistent/netrpc.toml").is_err());
    }
}
