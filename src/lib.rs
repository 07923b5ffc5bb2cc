//! PXPay gateway adapter
//!
//! Sends XML messages to the DPS PaymentExpress PXPay web interface over
//! HTTPS and returns the unparsed response. An offline test mode answers
//! from canned fixtures instead.
//!
//! ```no_run
//! use pxpay_gateway::{GatewayClient, GatewayOptions, RawMessage, ServerDirectory};
//!
//! # async fn run() -> Result<(), pxpay_gateway::GatewayError> {
//! let options = GatewayOptions::new("Sandbox");
//! let client = GatewayClient::https(&options, &ServerDirectory::default());
//!
//! let message = RawMessage::initial("<GenerateRequest>...</GenerateRequest>");
//! let response = client.send(&message, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod gateway;
pub mod http;
pub mod utils;

pub use config::{AppConfig, GatewayOptions, ServerDetails, ServerDirectory};
pub use gateway::{
    GatewayClient, GatewayError, MessageKind, OutboundMessage, RawMessage, ResponseBody,
};
pub use http::{HttpsTransport, Transport, TransportError};
