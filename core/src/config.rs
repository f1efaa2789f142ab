use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gateway and client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub allow_lan_access: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allow_lan_access: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_host(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            &self.host
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend origin queries and catalog reads are forwarded to.
    #[serde(default = "default_backend_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted session credential.
    #[serde(default = "default_session_dir")]
    pub directory: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directory: default_session_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
            timeouts: TimeoutsConfig::default(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_request_timeout() -> u64 {
    120
}

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Backend origin: environment-supplied, with a fixed local default.
pub fn default_backend_url() -> String {
    std::env::var("BACKEND_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| {
            std::env::var("NEXT_PUBLIC_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

fn default_session_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sqlrunner")
}

/// Get default config file path
/// Uses ~/.config/sqlrunner/config.toml for Unix-like CLI experience
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sqlrunner")
        .join("config.toml")
}

/// Load config from file, or return defaults if not found.
///
/// Loading order:
/// 1. Specified path (if provided)
/// 2. ./config.toml (if exists)
/// 3. default_config_path() (usually ~/.config/sqlrunner/config.toml)
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(config_path) = path {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded config from specified path {:?}", config_path);
            return Ok(config);
        } else {
            anyhow::bail!("Specified config file not found: {:?}", config_path);
        }
    }

    // Try current directory config.toml
    let local_config = PathBuf::from("config.toml");
    if local_config.exists() {
        match std::fs::read_to_string(&local_config) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from current directory {:?}", local_config);
                    return Ok(config);
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse ./config.toml: {}. Falling back to default path.",
                        e
                    );
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read ./config.toml: {}. Falling back to default path.",
                    e
                );
            }
        }
    }

    let default_path = default_config_path();
    if default_path.exists() {
        let content = std::fs::read_to_string(&default_path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!("Loaded config from default path {:?}", default_path);
        Ok(config)
    } else {
        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

/// Expand ~ in path to home directory
pub fn expand_path(path: &PathBuf) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if path_str.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path_str[2..]);
            }
        }
    }
    path.clone()
}
