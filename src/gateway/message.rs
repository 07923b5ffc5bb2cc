//! Outbound messages
//!
//! What the client needs from a message: its XML and which kind of
//! request it is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of PXPay request a message represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// `GenerateRequest`, answered with a redirect URI
    Initial,
    /// `ProcessResponse`, answered with transaction details
    Return,
    Other,
}

impl MessageKind {
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::Initial => "initial",
            MessageKind::Return => "return",
            MessageKind::Other => "other",
        }
    }

    pub fn all() -> Vec<MessageKind> {
        vec![MessageKind::Initial, MessageKind::Return, MessageKind::Other]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<MessageKind> {
        match s.to_lowercase().as_str() {
            "initial" | "initial-request" | "generate" => Some(MessageKind::Initial),
            "return" | "return-request" | "process" => Some(MessageKind::Return),
            "other" => Some(MessageKind::Other),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A message the gateway client can send.
///
/// The client never looks inside; it asks for the XML and, in offline
/// mode, for the kind.
pub trait OutboundMessage: fmt::Debug + Send + Sync {
    fn kind(&self) -> MessageKind {
        MessageKind::Other
    }

    fn to_xml(&self) -> String;
}

impl OutboundMessage for str {
    fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl OutboundMessage for String {
    fn to_xml(&self) -> String {
        self.clone()
    }
}

/// Pre-rendered XML tagged with its kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMessage {
    kind: MessageKind,
    xml: String,
}

impl RawMessage {
    pub fn new(kind: MessageKind, xml: impl Into<String>) -> Self {
        Self {
            kind,
            xml: xml.into(),
        }
    }

    pub fn initial(xml: impl Into<String>) -> Self {
        Self::new(MessageKind::Initial, xml)
    }

    pub fn return_request(xml: impl Into<String>) -> Self {
        Self::new(MessageKind::Return, xml)
    }
}

impl OutboundMessage for RawMessage {
    fn kind(&self) -> MessageKind {
        self.kind
    }

    fn to_xml(&self) -> String {
        self.xml.clone()
    }
}
