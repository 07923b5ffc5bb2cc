//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// PXPay web interface gateway client
#[derive(Parser, Debug)]
#[command(name = "pxpay-gateway")]
#[command(version)]
#[command(about = "Send XML messages to the PaymentExpress PXPay gateway")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send an XML message and print the raw response
    Send(SendArgs),

    /// List the server directory
    Servers,

    /// List supported site currencies
    Currencies,

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for send command
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// File holding the XML message ("-" for stdin)
    #[arg(short, long)]
    pub file: String,

    /// Message kind (initial, return, other)
    #[arg(short, long, default_value = "other")]
    pub kind: String,

    /// Answer from offline fixtures instead of the network
    #[arg(long)]
    pub offline: bool,

    /// Timeout in seconds (0 for the transport default)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Override the configured server type
    #[arg(short, long)]
    pub server_type: Option<String>,
}

/// Arguments for configuration management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "./pxpay.yaml")]
        output: String,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show effective configuration
    Show {
        /// Show environment variable settings instead
        #[arg(long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file (searched for when omitted)
        file: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_args() {
        let args = Args::parse_from([
            "pxpay-gateway",
            "send",
            "--file",
            "request.xml",
            "--kind",
            "initial",
            "--offline",
            "--timeout",
            "15",
        ]);
        match args.command {
            Command::Send(send_args) => {
                assert_eq!(send_args.file, "request.xml");
                assert_eq!(send_args.kind, "initial");
                assert!(send_args.offline);
                assert_eq!(send_args.timeout, Some(15));
                assert_eq!(send_args.server_type, None);
            }
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Args::parse_from(["pxpay-gateway", "servers", "--verbose", "-c", "pxpay.json"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("pxpay.json"));
        assert!(matches!(args.command, Command::Servers));
    }

    #[test]
    fn test_config_validate() {
        let args = Args::parse_from(["pxpay-gateway", "config", "validate", "pxpay.yaml"]);
        match args.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Validate { file },
            }) => assert_eq!(file.as_deref(), Some("pxpay.yaml")),
            _ => panic!("Expected Config Validate command"),
        }
    }
}
