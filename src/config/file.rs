//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::directory::{ServerDirectory, SANDBOX};
use super::env::EnvConfig;
use super::options::GatewayOptions;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./pxpay.yaml",
    "./pxpay.yml",
    "./pxpay.json",
    "./.pxpay/config.yaml",
    "~/.config/pxpay/config.yaml",
    "~/.pxpay.yaml",
];

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// PXPay account options
    pub gateway: GatewayOptions,

    /// Server directory; the built-in one when omitted
    #[serde(default)]
    pub servers: ServerDirectory,

    /// Default request timeout in seconds (transport default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Start the client in offline test mode
    #[serde(default)]
    pub offline: bool,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            gateway: GatewayOptions::default(),
            servers: ServerDirectory::default(),
            timeout_secs: None,
            offline: false,
        }
    }
}

impl AppConfig {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        for location in CONFIG_LOCATIONS {
            let path = expand_path(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from file.
    ///
    /// Only the file format is checked here; call [`AppConfig::validate`]
    /// once environment overrides have been applied.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Load from `path` (or `PXPAY_CONFIG`, or the standard locations) and
    /// apply environment overrides on top. Nothing is validated.
    pub fn load_with_env(path: Option<&Path>, env: &EnvConfig) -> Result<Self> {
        let env_path = env.config_file.as_deref().map(Path::new);
        let mut config = match path.or(env_path) {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?,
        };

        config.apply_env(env);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        if self.servers.is_empty() {
            anyhow::bail!("Server directory is empty");
        }

        self.gateway
            .validate(&self.servers)
            .context("Invalid gateway options")?;

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: default_version(),
            gateway: GatewayOptions::new(SANDBOX)
                .with_credentials("TestAccount", "0".repeat(super::options::KEY_LENGTH))
                .with_merchant_reference("Test Transaction")
                .with_currency("NZD"),
            servers: ServerDirectory::default(),
            timeout_secs: Some(30),
            offline: false,
        }
    }

    /// Override settings with values from the environment
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(server_type) = &env.server_type {
            self.gateway.server_type = server_type.clone();
        }
        if let Some(user_id) = &env.user_id {
            self.gateway.user_id = user_id.clone();
        }
        if let Some(key) = &env.key {
            self.gateway.key = key.clone();
        }
        if let Some(reference) = &env.merchant_reference {
            self.gateway.merchant_reference = Some(reference.clone());
        }
        if let Some(currency) = &env.currency {
            self.gateway.site_currency = currency.clone();
        }
        if env.timeout.is_some() {
            self.timeout_secs = env.timeout;
        }
        if let Some(offline) = env.offline {
            self.offline = offline;
        }
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.and_then(timeout_from_secs)
    }
}

/// Seconds to a request timeout; 0 means "use the transport default".
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
