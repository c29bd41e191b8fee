//! API server configuration, loadable from TOML or environment.

use std::path::{Path, PathBuf};

use lt_core::TailOptions;
use lt_core::types::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LINE_LENGTH};
use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The only directory log files may be served from.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Per-line byte cap; longer lines are truncated.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Read buffer capacity in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log")
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from `LT_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable values are
    /// ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("LT_HOST") {
            config.host = host;
        }
        if let Some(dir) = lookup("LT_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(port) = parse_var(&lookup, "LT_PORT") {
            config.port = port;
        }
        if let Some(len) = parse_var(&lookup, "LT_MAX_LINE_LENGTH") {
            config.max_line_length = len;
        }
        if let Some(size) = parse_var(&lookup, "LT_CHUNK_SIZE") {
            config.chunk_size = size;
        }
        config
    }

    pub fn tail_options(&self) -> TailOptions {
        TailOptions {
            max_line_length: self.max_line_length,
            chunk_size: self.chunk_size,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_dir: default_log_dir(),
            max_line_length: default_max_line_length(),
            chunk_size: default_chunk_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_dir, PathBuf::from("/var/log"));
        assert_eq!(config.tail_options(), TailOptions::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn deserialize_minimal_config() {
        let config: ApiConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_line_length, 10 * 1024);
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
host = "127.0.0.1"
port = 8080
log_dir = "/srv/logs"
max_line_length = 4096
chunk_size = 65536
"#;
        let config: ApiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_dir, PathBuf::from("/srv/logs"));
        assert_eq!(config.tail_options().max_line_length, 4096);
        assert_eq!(config.tail_options().chunk_size, 65536);
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lt-api.toml");
        std::fs::write(&path, "port = 9000\nlog_dir = \"/tmp/logs\"\n").unwrap();

        let config = ApiConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert!(ApiConfig::from_file(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn env_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("LT_HOST", "127.0.0.1"),
            ("LT_PORT", "4000"),
            ("LT_LOG_DIR", "/data/logs"),
            ("LT_MAX_LINE_LENGTH", "512"),
        ]
        .into();
        let config = ApiConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
        assert_eq!(config.log_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.max_line_length, 512);
        assert_eq!(config.chunk_size, 1024 * 1024);
    }

    #[test]
    fn bad_env_values_ignored() {
        let config = ApiConfig::from_lookup(|k| (k == "LT_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.port, 3000);
    }
}
