//! HTTPS transport for gateway messages
//!
//! Provides the POST primitive the gateway client sends through.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Url,
};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Transport errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

/// A single outbound POST
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub timeout: Option<Duration>,
}

impl PostRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Case-insensitive header lookup
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Something that can deliver a POST and hand back the raw response body.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn post(&self, request: PostRequest) -> Result<Vec<u8>, TransportError>;
}

/// reqwest-backed HTTPS transport.
///
/// Every call builds its own client with idle pooling disabled, so no
/// connection outlives the request that opened it.
#[derive(Clone, Debug, Default)]
pub struct HttpsTransport;

impl HttpsTransport {
    pub fn new() -> Self {
        Self
    }

    fn build_client(&self, timeout: Option<Duration>) -> Result<Client, TransportError> {
        let mut builder = Client::builder().https_only(true).pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| TransportError::RequestFailed(describe(&e)))
    }
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(key.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(key.clone()))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Where in the exchange an error surfaced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Send,
    Body,
}

/// The reqwest error flags classification looks at
#[derive(Clone, Copy, Debug, Default)]
struct ErrorFlags {
    timeout: bool,
    builder: bool,
}

impl From<&reqwest::Error> for ErrorFlags {
    fn from(err: &reqwest::Error) -> Self {
        Self {
            timeout: err.is_timeout(),
            builder: err.is_builder(),
        }
    }
}

fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

/// Kind of the first `io::Error` in the source chain
fn io_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    chain(err).find_map(|e| e.downcast_ref::<io::Error>().map(io::Error::kind))
}

/// Every message in the source chain, outermost first
fn describe(err: &(dyn StdError + 'static)) -> String {
    chain(err)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    if io_kind(err) == Some(io::ErrorKind::InvalidData) {
        return true;
    }
    let text = describe(err).to_lowercase();
    ["tls", "certificate", "handshake"]
        .iter()
        .any(|needle| text.contains(needle))
}

/// Map a failed exchange onto [`TransportError`].
///
/// DNS and other connect failures that are neither refused nor TLS end up
/// as `RequestFailed`.
fn classify(
    flags: ErrorFlags,
    err: &(dyn StdError + 'static),
    stage: Stage,
    url: &str,
    timeout: Option<Duration>,
) -> TransportError {
    let kind = io_kind(err);

    if flags.timeout || kind == Some(io::ErrorKind::TimedOut) {
        return TransportError::Timeout(timeout.unwrap_or_default());
    }

    match stage {
        Stage::Body => TransportError::BodyRead(describe(err)),
        Stage::Send if flags.builder => TransportError::InvalidUrl(url.to_string()),
        Stage::Send if kind == Some(io::ErrorKind::ConnectionRefused) => {
            TransportError::ConnectionRefused(url.to_string())
        }
        Stage::Send if is_tls_failure(err) => TransportError::TlsError(describe(err)),
        Stage::Send => TransportError::RequestFailed(describe(err)),
    }
}

fn classify_reqwest(
    err: reqwest::Error,
    stage: Stage,
    url: &str,
    timeout: Option<Duration>,
) -> TransportError {
    classify(ErrorFlags::from(&err), &err, stage, url, timeout)
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn post(&self, request: PostRequest) -> Result<Vec<u8>, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{} ({e})", request.url)))?;
        let headers = build_headers(&request.headers)?;
        let client = self.build_client(request.timeout)?;

        debug!("POST {} ({} bytes)", url, request.body.len());

        let response = client
            .post(url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| classify_reqwest(e, Stage::Send, &request.url, request.timeout))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest(e, Stage::Body, &request.url, request.timeout))?;

        debug!(
            "Response: {} {} ({} bytes)",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            body.len()
        );

        Ok(body.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Canned outcome for the next POSTs.
    #[derive(Debug, Clone)]
    pub enum Reply {
        Body(Vec<u8>),
        Refused,
    }

    /// Transport that records every request instead of touching the network.
    #[derive(Debug)]
    pub struct RecordingTransport {
        reply: Reply,
        requests: Mutex<Vec<PostRequest>>,
    }

    impl RecordingTransport {
        pub fn replying(body: &str) -> Self {
            Self {
                reply: Reply::Body(body.as_bytes().to_vec()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn refusing() -> Self {
            Self {
                reply: Reply::Refused,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<PostRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post(&self, request: PostRequest) -> Result<Vec<u8>, TransportError> {
            let url = request.url.clone();
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Reply::Body(body) => Ok(body.clone()),
                Reply::Refused => Err(TransportError::ConnectionRefused(url)),
            }
        }
    }
}
