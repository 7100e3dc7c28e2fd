use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::version::types::Credentials;

// =============================================================================
// Constants
// =============================================================================

/// Timeout for a single registry page fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "SDK_RESOLVER_CONFIG";

/// Environment variable overriding the patterns file path
pub const PATTERNS_PATH_ENV: &str = "SDK_RESOLVER_PATTERNS";

const APP_DIR: &str = "sdk-resolver";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("distribution {0} not found in configuration")]
    UnknownDistribution(String),

    #[error("registry {registry} referenced by {distribution} not found in configuration")]
    UnknownRegistry {
        registry: String,
        distribution: String,
    },
}

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub registries: IndexMap<String, RegistryConfig>,
    pub sdk_repositories: IndexMap<String, SdkRepository>,
}

/// General settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
    pub log_format: LogFormat,
    /// Directory for the log file; logs go to stderr when unset
    pub log_path: Option<PathBuf>,
    /// Patterns file location (tilde is expanded)
    pub patterns_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            log_path: None,
            patterns_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A remote artifact registry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// Registry kind (only "nexus" is supported)
    #[serde(rename = "type")]
    pub kind: String,
    /// Listing endpoint; `{repository}` is replaced by the repository name
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl RegistryConfig {
    /// Credentials are used only when both username and password are set
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.username.as_deref(), self.password.as_deref())
    }
}

/// One SDK distribution hosted in a registry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SdkRepository {
    /// SDK type (e.g., "jdk", "node")
    #[serde(rename = "type")]
    pub sdk_type: String,
    /// Name of the entry in `[registries]`
    pub registry: String,
    /// Repository name inside the registry
    pub repository: String,
    /// Path prefix of the distribution inside the repository
    pub path: String,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Look up a distribution and the registry hosting it
    pub fn distribution(
        &self,
        name: &str,
    ) -> Result<(&SdkRepository, &RegistryConfig), ConfigError> {
        let repository = self
            .sdk_repositories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownDistribution(name.to_string()))?;
        let registry = self.registries.get(&repository.registry).ok_or_else(|| {
            ConfigError::UnknownRegistry {
                registry: repository.registry.clone(),
                distribution: name.to_string(),
            }
        })?;
        Ok((repository, registry))
    }

    /// SDK types that have at least one distribution, sorted
    pub fn sdk_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .sdk_repositories
            .values()
            .map(|repo| repo.sdk_type.as_str())
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Distribution names of `sdk_type`, sorted
    pub fn distributions(&self, sdk_type: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .sdk_repositories
            .iter()
            .filter(|(_, repo)| repo.sdk_type == sdk_type)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Returns the configuration directory for sdk-resolver.
/// Uses $XDG_CONFIG_HOME/sdk-resolver if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/sdk-resolver,
/// or ./sdk-resolver if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Configuration file path: CLI flag, then env var, then the config directory
pub fn config_path(cli_path: Option<&Path>) -> PathBuf {
    config_path_with_env(cli_path, std::env::var(CONFIG_PATH_ENV).ok(), config_dir())
}

/// Patterns file path: env var, then the configured path, then the config directory
pub fn patterns_path(configured: Option<&str>) -> PathBuf {
    patterns_path_with_env(
        std::env::var(PATTERNS_PATH_ENV).ok(),
        configured,
        dirs::home_dir(),
        config_dir(),
    )
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join(APP_DIR)
}

fn config_path_with_env(
    cli_path: Option<&Path>,
    env_path: Option<String>,
    config_dir: PathBuf,
) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| env_path.filter(|p| !p.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config_dir.join("config.toml"))
}

fn patterns_path_with_env(
    env_path: Option<String>,
    configured: Option<&str>,
    home_dir: Option<PathBuf>,
    config_dir: PathBuf,
) -> PathBuf {
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    match configured.filter(|p| !p.is_empty()) {
        Some(path) => expand_tilde(path, home_dir),
        None => config_dir.join("patterns.toml"),
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &str, home_dir: Option<PathBuf>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) => rest,
        None => return PathBuf::from(path),
    };

    match home_dir {
        Some(home) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}
