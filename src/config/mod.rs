//! Configuration module
//!
//! Server directory, gateway options, config files and environment overrides.

mod directory;
mod env;
mod file;
mod options;

pub use directory::{ServerDetails, ServerDirectory, PRODUCTION, SANDBOX};
pub use env::{print_env_help, EnvBuilder, EnvConfig, EnvGuard};
pub use file::{timeout_from_secs, AppConfig};
pub use options::{
    is_supported_currency, GatewayOptions, OptionsError, CURRENCIES, KEY_LENGTH,
    MAX_MERCHANT_REFERENCE,
};
