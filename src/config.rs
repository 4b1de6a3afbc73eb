use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::parser::HeaderPolicy;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "STATICD_CONFIG";
/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Connections handled at the same time; further accepts wait for a slot
    pub max_connections: usize,
    /// Per read call
    pub read_timeout_ms: u64,
    /// Largest request head accepted, and the size the parser sees at most
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Serving root; request paths are resolved beneath it
    pub root: PathBuf,
    pub malformed_headers: HeaderPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            max_connections: 1024,
            read_timeout_ms: 5000,
            max_request_bytes: 1024,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("file"),
            malformed_headers: HeaderPolicy::Skip,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Config {
    /// Loads the config file named by `STATICD_CONFIG` (defaults otherwise),
    /// then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(text)?;
        anyhow::ensure!(cfg.server.max_connections > 0, "server.max_connections must be at least 1");
        anyhow::ensure!(cfg.server.max_request_bytes > 0, "server.max_request_bytes must be at least 1");
        Ok(cfg)
    }
}
