//! Server directory
//!
//! Maps a server type (gateway environment) to the host and path of its
//! PXPay endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Production PXPay environment
pub const PRODUCTION: &str = "Production";

/// Sandbox (UAT) PXPay environment
pub const SANDBOX: &str = "Sandbox";

const PXACCESS_PATH: &str = "/pxpay/pxaccess.aspx";

/// Host and path of one gateway environment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDetails {
    pub host: String,
    pub path: String,
}

impl ServerDetails {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// `https://{host}{path}`
    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.path)
    }
}

/// Read-only lookup from server type to [`ServerDetails`].
///
/// The default directory knows the `Production` and `Sandbox` environments.
/// A config file can replace it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerDirectory {
    servers: BTreeMap<String, ServerDetails>,
}

impl Default for ServerDirectory {
    fn default() -> Self {
        Self::empty()
            .with_server(
                PRODUCTION,
                ServerDetails::new("sec.paymentexpress.com", PXACCESS_PATH),
            )
            .with_server(
                SANDBOX,
                ServerDetails::new("uat.paymentexpress.com", PXACCESS_PATH),
            )
    }
}

impl ServerDirectory {
    /// A directory with no entries
    pub fn empty() -> Self {
        Self {
            servers: BTreeMap::new(),
        }
    }

    /// Add or replace an entry
    pub fn with_server(mut self, server_type: impl Into<String>, details: ServerDetails) -> Self {
        self.servers.insert(server_type.into(), details);
        self
    }

    pub fn get(&self, server_type: &str) -> Option<&ServerDetails> {
        self.servers.get(server_type)
    }

    pub fn contains(&self, server_type: &str) -> bool {
        self.servers.contains_key(server_type)
    }

    /// The server-type vocabulary, in sorted order
    pub fn server_types(&self) -> Vec<&str> {
        self.servers.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerDetails)> {
        self.servers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory() {
        let directory = ServerDirectory::default();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.server_types(), vec![PRODUCTION, SANDBOX]);

        let sandbox = directory.get(SANDBOX).unwrap();
        assert_eq!(sandbox.host, "uat.paymentexpress.com");
        assert_eq!(sandbox.url(), "https://uat.paymentexpress.com/pxpay/pxaccess.aspx");
    }

    #[test]
    fn test_unknown_server_type() {
        let directory = ServerDirectory::default();
        assert!(directory.get("Staging").is_none());
        assert!(!directory.contains("Staging"));
    }

    #[test]
    fn test_custom_directory_yaml() {
        let yaml = "Local:\n  host: localhost:8443\n  path: /pxpay\n";
        let directory: ServerDirectory = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.get("Local").unwrap().url(),
            "https://localhost:8443/pxpay"
        );
    }
}
