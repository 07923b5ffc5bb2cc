//! PXPay web interface gateway client
//!
//! Posts XML messages to the configured PXPay endpoint and hands back the
//! raw response body. In offline test mode it answers from canned
//! fixtures instead of touching the network.

use std::str::Utf8Error;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fixtures::fixture_for;
use super::message::OutboundMessage;
use crate::config::{GatewayOptions, ServerDetails, ServerDirectory};
use crate::http::{HttpsTransport, PostRequest, Transport, TransportError};

/// Content type PXPay expects on every request
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Gateway client errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway transport failed: {0}")]
    Transport(#[from] TransportError),
}

/// Unparsed gateway response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseBody(Vec<u8>);

impl ResponseBody {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// Client for the PXPay web interface gateway
#[derive(Debug)]
pub struct GatewayClient {
    server_type: String,
    server: Option<ServerDetails>,
    offline: bool,
    transport: Arc<dyn Transport>,
}

impl GatewayClient {
    /// Create a client for `server_type`, resolving its endpoint from
    /// `directory`.
    ///
    /// An unknown server type is accepted; sends then fail in the transport.
    pub fn new(
        server_type: impl Into<String>,
        directory: &ServerDirectory,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let server_type = server_type.into();
        let server = directory.get(&server_type).cloned();

        match &server {
            Some(details) => debug!("Server type {} resolved to {}", server_type, details.url()),
            None => debug!("Server type {} not in server directory", server_type),
        }

        Self {
            server_type,
            server,
            offline: false,
            transport,
        }
    }

    /// Create a client from gateway options
    pub fn configure(
        options: &GatewayOptions,
        directory: &ServerDirectory,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::new(options.server_type.clone(), directory, transport)
    }

    /// Create a client that talks HTTPS
    pub fn https(options: &GatewayOptions, directory: &ServerDirectory) -> Self {
        Self::configure(options, directory, Arc::new(HttpsTransport::new()))
    }

    pub fn server_type(&self) -> &str {
        &self.server_type
    }

    pub fn host(&self) -> Option<&str> {
        self.server.as_ref().map(|s| s.host.as_str())
    }

    pub fn path(&self) -> Option<&str> {
        self.server.as_ref().map(|s| s.path.as_str())
    }

    /// `https://{host}{path}`, with empty parts for an unresolved server type
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}{}",
            self.host().unwrap_or_default(),
            self.path().unwrap_or_default()
        )
    }

    pub fn set_offline_mode(&mut self, enabled: bool) {
        self.offline = enabled;
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Send `message` and return the raw response body.
    ///
    /// Online this is exactly one POST; the body comes back whatever the
    /// HTTP status. Offline the answer is the fixture for the message kind,
    /// or `None` when the kind has no fixture.
    pub async fn send<M>(
        &self,
        message: &M,
        timeout: Option<Duration>,
    ) -> Result<Option<ResponseBody>, GatewayError>
    where
        M: OutboundMessage + ?Sized,
    {
        if self.offline {
            return Ok(self.send_offline(message));
        }

        let body = message.to_xml();
        info!("About to send: {}", body);

        let request = PostRequest::new(self.endpoint())
            .header("Content-Type", CONTENT_TYPE)
            .header("Content-Length", body.len().to_string())
            .body(body)
            .timeout(timeout);

        let response = self.transport.post(request).await?;
        debug!("Received {} bytes from {}", response.len(), self.server_type);

        Ok(Some(ResponseBody::from(response)))
    }

    /// Answer from the fixtures without any network I/O
    pub fn send_offline<M>(&self, message: &M) -> Option<ResponseBody>
    where
        M: OutboundMessage + ?Sized,
    {
        let kind = message.kind();
        match fixture_for(kind) {
            Some(fixture) => {
                debug!("Offline test mode: answering {} request from fixture", kind);
                Some(ResponseBody::from(fixture))
            }
            None => {
                warn!("Offline test mode: no fixture for {} message", kind);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PRODUCTION, SANDBOX};
    use crate::gateway::fixtures::{INITIAL_RESPONSE_FIXTURE, RETURN_RESPONSE_FIXTURE};
    use crate::gateway::message::{MessageKind, RawMessage};
    use crate::http::mock::RecordingTransport;

    fn client_with(server_type: &str, transport: Arc<RecordingTransport>) -> GatewayClient {
        GatewayClient::new(server_type, &ServerDirectory::default(), transport)
    }

    #[tokio::test]
    async fn test_posts_to_resolved_endpoint_for_every_server_type() {
        let directory = ServerDirectory::default();

        for (server_type, details) in directory.iter() {
            let transport = Arc::new(RecordingTransport::replying("<Response/>"));
            let client = GatewayClient::new(server_type, &directory, transport.clone());

            client.send("<Request/>", None).await.unwrap();

            let requests = transport.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(
                requests[0].url,
                format!("https://{}{}", details.host, details.path)
            );
        }
    }

    #[tokio::test]
    async fn test_sandbox_scenario() {
        let transport = Arc::new(RecordingTransport::replying("<Response valid=\"1\"/>"));
        let client = client_with(SANDBOX, transport.clone());

        let response = client.send("<Request/>", None).await.unwrap().unwrap();
        assert_eq!(response.as_str().unwrap(), "<Response valid=\"1\"/>");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://uat.paymentexpress.com/pxpay/pxaccess.aspx"
        );
        assert_eq!(requests[0].body, b"<Request/>".to_vec());
        assert_eq!(requests[0].timeout, None);
    }

    #[tokio::test]
    async fn test_online_headers() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let client = client_with(PRODUCTION, transport.clone());
        let message =
            RawMessage::initial("<GenerateRequest><PxPayUserId>Shop</PxPayUserId></GenerateRequest>");

        client
            .send(&message, Some(Duration::from_secs(10)))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.get_header("Content-Type"), Some(CONTENT_TYPE));
        assert_eq!(
            request.get_header("Content-Length"),
            Some(request.body.len().to_string().as_str())
        );
        assert_eq!(request.timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_content_length_counts_bytes() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let client = client_with(SANDBOX, transport.clone());

        client.send("<Ref>Café</Ref>", None).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.get_header("Content-Length"), Some("16"));
    }

    #[tokio::test]
    async fn test_empty_response_body_is_returned() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let client = client_with(SANDBOX, transport);

        let response = client.send("<Request/>", None).await.unwrap();
        assert_eq!(response, Some(ResponseBody::from("")));
    }

    #[tokio::test]
    async fn test_offline_initial_fixture() {
        let transport = Arc::new(RecordingTransport::replying("network"));
        let mut client = client_with(SANDBOX, transport.clone());
        client.set_offline_mode(true);

        let response = client
            .send(&RawMessage::initial("<GenerateRequest/>"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.as_bytes(), INITIAL_RESPONSE_FIXTURE.as_bytes());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_offline_return_fixture() {
        let transport = Arc::new(RecordingTransport::replying("network"));
        let mut client = client_with(SANDBOX, transport.clone());
        client.set_offline_mode(true);

        let response = client
            .send(&RawMessage::return_request("<ProcessResponse/>"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.as_bytes(), RETURN_RESPONSE_FIXTURE.as_bytes());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_offline_unrecognized_kind_yields_none() {
        let transport = Arc::new(RecordingTransport::replying("network"));
        let mut client = client_with(SANDBOX, transport.clone());
        client.set_offline_mode(true);

        let response = client
            .send(&RawMessage::new(MessageKind::Other, "<Request/>"), None)
            .await
            .unwrap();

        assert_eq!(response, None);
        assert_eq!(client.send("<Request/>", None).await.unwrap(), None);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_offline_toggle() {
        let transport = Arc::new(RecordingTransport::replying("online"));
        let mut client = client_with(SANDBOX, transport.clone());
        assert!(!client.is_offline());

        client.set_offline_mode(true);
        assert!(client.is_offline());
        client.set_offline_mode(false);
        assert!(!client.is_offline());

        let response = client
            .send(&RawMessage::initial("<GenerateRequest/>"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.as_str().unwrap(), "online");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(RecordingTransport::refusing());
        let client = client_with(SANDBOX, transport.clone());

        let err = client.send("<Request/>", None).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Transport(TransportError::ConnectionRefused(_))
        ));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_server_type_is_deferred() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let client = client_with("Staging", transport.clone());

        assert_eq!(client.host(), None);
        assert_eq!(client.path(), None);
        assert_eq!(client.endpoint(), "https://");

        client.send("<Request/>", None).await.unwrap();
        assert_eq!(transport.requests()[0].url, "https://");
    }

    #[tokio::test]
    async fn test_unknown_server_type_fails_in_https_transport() {
        let options = GatewayOptions::new("Staging");
        let client = GatewayClient::https(&options, &ServerDirectory::default());

        let err = client.send("<Request/>", None).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Transport(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_configure_from_options() {
        let options = GatewayOptions::new(PRODUCTION);
        let client = GatewayClient::https(&options, &ServerDirectory::default());

        assert_eq!(client.server_type(), PRODUCTION);
        assert_eq!(client.host(), Some("sec.paymentexpress.com"));
        assert_eq!(client.path(), Some("/pxpay/pxaccess.aspx"));
        assert_eq!(
            client.endpoint(),
            "https://sec.paymentexpress.com/pxpay/pxaccess.aspx"
        );
    }
}
