//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "PXPAY";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Server type from PXPAY_SERVER_TYPE
    pub server_type: Option<String>,
    /// User id from PXPAY_USER_ID
    pub user_id: Option<String>,
    /// Key from PXPAY_KEY
    pub key: Option<String>,
    /// Merchant reference from PXPAY_MERCHANT_REFERENCE
    pub merchant_reference: Option<String>,
    /// Site currency from PXPAY_CURRENCY
    pub currency: Option<String>,
    /// Timeout from PXPAY_TIMEOUT
    pub timeout: Option<u64>,
    /// Offline test mode from PXPAY_OFFLINE
    pub offline: Option<bool>,
    /// Config file from PXPAY_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            server_type: get_env("SERVER_TYPE"),
            user_id: get_env("USER_ID"),
            key: get_env("KEY"),
            merchant_reference: get_env("MERCHANT_REFERENCE"),
            currency: get_env("CURRENCY"),
            timeout: get_env_parse("TIMEOUT"),
            offline: get_env_bool("OFFLINE"),
            config_file: get_env("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.server_type.is_some()
            || self.user_id.is_some()
            || self.key.is_some()
            || self.merchant_reference.is_some()
            || self.currency.is_some()
            || self.timeout.is_some()
            || self.offline.is_some()
            || self.config_file.is_some()
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn server_type(mut self, server_type: impl Into<String>) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_SERVER_TYPE"), server_type.into()));
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_USER_ID"), user_id.into()));
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TIMEOUT"), timeout.to_string()));
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_OFFLINE"), offline.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all PXPAY environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_SERVER_TYPE         Gateway environment (Production, Sandbox)");
    println!("  {ENV_PREFIX}_USER_ID             PXPay account user id");
    println!("  {ENV_PREFIX}_KEY                 64 character PXPay key");
    println!("  {ENV_PREFIX}_MERCHANT_REFERENCE  Text shown on transaction reports");
    println!("  {ENV_PREFIX}_CURRENCY            Site currency (NZD, AUD, ...)");
    println!("  {ENV_PREFIX}_TIMEOUT             Request timeout in seconds");
    println!("  {ENV_PREFIX}_OFFLINE             Offline test mode (true/false)");
    println!("  {ENV_PREFIX}_CONFIG              Path to configuration file");
}
