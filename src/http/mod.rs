//! HTTP transport module
//!
//! Provides the HTTPS POST primitive used to reach the payment gateway.

mod transport;

#[cfg(test)]
pub(crate) use transport::mock;
pub use transport::{HttpsTransport, PostRequest, Transport, TransportError};
