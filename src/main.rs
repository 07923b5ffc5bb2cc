//! PXPay gateway CLI
//!
//! Sends XML messages to the PaymentExpress PXPay web interface and prints
//! the raw response.
//!
//! ## Usage
//!
//! ```bash
//! # Send a GenerateRequest to the sandbox
//! pxpay-gateway send --file generate.xml --kind initial --server-type Sandbox
//!
//! # Same, answered from the offline fixtures
//! pxpay-gateway send --file generate.xml --kind initial --offline
//!
//! # Show where each server type points
//! pxpay-gateway servers
//!
//! # Write and check a configuration file
//! pxpay-gateway config init --output pxpay.yaml
//! pxpay-gateway config validate pxpay.yaml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

use pxpay_gateway::cli::{self, Args};
use pxpay_gateway::config::{
    print_env_help, timeout_from_secs, AppConfig, EnvConfig, CURRENCIES,
};
use pxpay_gateway::gateway::{GatewayClient, MessageKind, RawMessage};
use pxpay_gateway::utils::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.verbose);

    match args.command {
        cli::Command::Send(send_args) => {
            let config = load_config(args.config.as_deref())?;
            send_message(send_args, config).await?;
        }
        cli::Command::Servers => {
            let config = load_config(args.config.as_deref())?;
            list_servers(&config);
        }
        cli::Command::Currencies => {
            println!("{}", CURRENCIES.join("\n"));
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config.as_deref())?;
        }
    }

    Ok(())
}

/// Load configuration from --config, PXPAY_CONFIG or the standard locations,
/// then apply environment overrides.
fn load_config(path: Option<&str>) -> Result<AppConfig> {
    AppConfig::load_with_env(path.map(Path::new), &EnvConfig::load())
}

fn read_message(file: &str) -> Result<String> {
    if file == "-" {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("Failed to read message from stdin")?;
        Ok(xml)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read message file: {file}"))
    }
}

async fn send_message(args: cli::SendArgs, mut config: AppConfig) -> Result<()> {
    if let Some(server_type) = args.server_type {
        config.gateway.server_type = server_type;
    }

    let kind = MessageKind::from_str(&args.kind)
        .ok_or_else(|| anyhow::anyhow!("Unknown message kind: {}", args.kind))?;
    let message = RawMessage::new(kind, read_message(&args.file)?);

    let mut client = GatewayClient::https(&config.gateway, &config.servers);
    client.set_offline_mode(args.offline || config.offline);

    if !client.is_offline() {
        if let Err(e) = config.validate() {
            warn!("Configuration is not valid: {e:#}");
        }
    }

    let timeout = match args.timeout {
        Some(secs) => timeout_from_secs(secs),
        None => config.timeout(),
    };

    info!(
        "Sending {} message to {} ({}){}",
        kind,
        client.server_type(),
        client.endpoint(),
        if client.is_offline() { " [offline]" } else { "" }
    );

    match client
        .send(&message, timeout)
        .await
        .context("Failed to send message")?
    {
        Some(body) => {
            let mut stdout = std::io::stdout();
            stdout.write_all(body.as_bytes())?;
            writeln!(stdout)?;
        }
        None => warn!("No offline fixture for {} messages", kind),
    }

    Ok(())
}

fn list_servers(config: &AppConfig) {
    println!("SERVER TYPE      ENDPOINT");
    for (server_type, details) in config.servers.iter() {
        let marker = if server_type == config.gateway.server_type {
            " (configured)"
        } else {
            ""
        };
        println!("{:<16} {}{}", server_type, details.url(), marker);
    }
}

fn manage_config(args: cli::ConfigArgs, config_path: Option<&str>) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            AppConfig::example().save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to set your PXPay user id and key.");
        }

        cli::ConfigAction::Show { env, format } => {
            if env {
                println!("{:#?}", EnvConfig::load());
                println!();
                print_env_help();
            } else {
                let config = load_config(config_path)?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&config)?
                } else {
                    serde_yaml::to_string(&config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = file
                .or_else(|| config_path.map(str::to_string))
                .or_else(|| AppConfig::find().map(|p| p.to_string_lossy().to_string()))
                .unwrap_or_else(|| "./pxpay.yaml".to_string());

            let result = AppConfig::load_with_env(Some(Path::new(&path)), &EnvConfig::load())
                .and_then(|config| config.validate());

            match result {
                Ok(()) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
