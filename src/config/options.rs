//! Gateway options
//!
//! The merchant-facing settings of a PXPay account and the vocabularies
//! their choice fields draw from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::directory::{ServerDirectory, SANDBOX};

/// Length of a PXPay key
pub const KEY_LENGTH: usize = 64;

/// Longest merchant reference PXPay accepts
pub const MAX_MERCHANT_REFERENCE: usize = 64;

/// Currencies PXPay can settle in
pub const CURRENCIES: &[&str] = &[
    "AUD", "BND", "CAD", "CHF", "EUR", "FJD", "FRF", "GBP", "HKD", "JPY", "KWD", "MYR", "NZD",
    "PNG", "SBD", "SGD", "TOP", "USD", "VUV", "WST", "ZAR",
];

/// Options validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Unknown server type '{0}'")]
    UnknownServerType(String),

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be ASCII")]
    NotAscii(&'static str),

    #[error("PXPay key must be 64 characters, got {0}")]
    KeyLength(usize),

    #[error("Merchant reference must be at most 64 characters, got {0}")]
    MerchantReferenceLength(usize),

    #[error("Unsupported site currency '{0}'")]
    UnknownCurrency(String),
}

/// PXPay account options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOptions {
    /// Gateway environment, a key of the server directory
    pub server_type: String,

    /// PXPay account user id
    pub user_id: String,

    /// 64 character PXPay key
    pub key: String,

    /// Free text shown on transaction reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_reference: Option<String>,

    /// Currency the site charges in
    pub site_currency: String,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            server_type: SANDBOX.to_string(),
            user_id: String::new(),
            key: String::new(),
            merchant_reference: None,
            site_currency: "NZD".to_string(),
        }
    }
}

impl GatewayOptions {
    pub fn new(server_type: impl Into<String>) -> Self {
        Self {
            server_type: server_type.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, user_id: impl Into<String>, key: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.key = key.into();
        self
    }

    pub fn with_merchant_reference(mut self, reference: impl Into<String>) -> Self {
        self.merchant_reference = Some(reference.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.site_currency = currency.into();
        self
    }

    /// Check every field against its schema, reporting the first violation.
    pub fn validate(&self, directory: &ServerDirectory) -> Result<(), OptionsError> {
        if !directory.contains(&self.server_type) {
            return Err(OptionsError::UnknownServerType(self.server_type.clone()));
        }

        if self.user_id.is_empty() {
            return Err(OptionsError::Missing("user_id"));
        }
        if !self.user_id.is_ascii() {
            return Err(OptionsError::NotAscii("user_id"));
        }

        if self.key.is_empty() {
            return Err(OptionsError::Missing("key"));
        }
        if !self.key.is_ascii() {
            return Err(OptionsError::NotAscii("key"));
        }
        if self.key.len() != KEY_LENGTH {
            return Err(OptionsError::KeyLength(self.key.len()));
        }

        if let Some(reference) = &self.merchant_reference {
            if !reference.is_ascii() {
                return Err(OptionsError::NotAscii("merchant_reference"));
            }
            if reference.len() > MAX_MERCHANT_REFERENCE {
                return Err(OptionsError::MerchantReferenceLength(reference.len()));
            }
        }

        if !is_supported_currency(&self.site_currency) {
            return Err(OptionsError::UnknownCurrency(self.site_currency.clone()));
        }

        Ok(())
    }
}

/// Check a currency code against [`CURRENCIES`]
pub fn is_supported_currency(code: &str) -> bool {
    CURRENCIES.contains(&code)
}
