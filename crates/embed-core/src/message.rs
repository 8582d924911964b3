//! # Protocol Messages
//!
//! Messages exchanged between the host page and the embedded checkout over
//! `window.postMessage`. Every message travels as a flat JSON envelope:
//!
//! ```text
//! { "type": "POLAR_CHECKOUT", "event": "loaded" }
//! { "type": "POLAR_CHECKOUT", "event": "close" }
//! { "type": "POLAR_CHECKOUT", "event": "success", "successURL": "...", "redirect": true }
//! ```
//!
//! The window message channel is shared with unrelated traffic, so anything
//! without the `type` discriminator is classified as foreign and ignored.

use serde::Deserialize;
use serde_json::{json, Value};

/// Discriminator carried by every checkout envelope
pub const CHECKOUT_EVENT_TYPE: &str = "POLAR_CHECKOUT";

/// Target origin used when posting to the parent window.
/// Payloads are lifecycle and navigation signals only.
pub const POST_TARGET_ORIGIN: &str = "*";

/// A checkout protocol message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EmbedMessage {
    /// Checkout content finished initializing
    Loaded,
    /// Checkout asks the host to dismiss it
    Close,
    /// Checkout completed
    Success {
        #[serde(rename = "successURL")]
        success_url: String,
        redirect: bool,
    },
}

impl EmbedMessage {
    pub fn success(success_url: impl Into<String>, redirect: bool) -> Self {
        EmbedMessage::Success {
            success_url: success_url.into(),
            redirect,
        }
    }

    /// Event name as it appears on the wire
    pub fn event_name(&self) -> &'static str {
        match self {
            EmbedMessage::Loaded => "loaded",
            EmbedMessage::Close => "close",
            EmbedMessage::Success { .. } => "success",
        }
    }

    /// Build the tagged envelope posted across windows
    pub fn envelope(&self) -> Value {
        match self {
            EmbedMessage::Loaded | EmbedMessage::Close => json!({
                "type": CHECKOUT_EVENT_TYPE,
                "event": self.event_name(),
            }),
            EmbedMessage::Success {
                success_url,
                redirect,
            } => json!({
                "type": CHECKOUT_EVENT_TYPE,
                "event": self.event_name(),
                "successURL": success_url,
                "redirect": redirect,
            }),
        }
    }
}

/// Classification of an arbitrary window message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Not ours: missing or different discriminator
    Foreign,
    /// Tagged as ours but with an unknown event or malformed payload
    Unrecognized(String),
    /// A valid checkout message
    Message(EmbedMessage),
}

impl Inbound {
    /// Classify the `data` of a message event
    pub fn decode(data: &Value) -> Self {
        let tagged = data
            .as_object()
            .and_then(|obj| obj.get("type"))
            .and_then(Value::as_str)
            == Some(CHECKOUT_EVENT_TYPE);

        if !tagged {
            return Inbound::Foreign;
        }

        match EmbedMessage::deserialize(data) {
            Ok(message) => Inbound::Message(message),
            Err(e) => Inbound::Unrecognized(e.to_string()),
        }
    }

    pub fn into_message(self) -> Option<EmbedMessage> {
        match self {
            Inbound::Message(message) => Some(message),
            _ => None,
        }
    }
}
