//! PXPay gateway module
//!
//! The gateway client, the messages it sends and its offline fixtures.

mod client;
mod fixtures;
mod message;

pub use client::{GatewayClient, GatewayError, ResponseBody, CONTENT_TYPE};
pub use fixtures::{fixture_for, INITIAL_RESPONSE_FIXTURE, RETURN_RESPONSE_FIXTURE};
pub use message::{MessageKind, OutboundMessage, RawMessage};
