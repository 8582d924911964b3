//! # Checkout Side
//!
//! Sender half of the protocol, used by the checkout page running inside
//! the iframe to talk to the host page.

use crate::dom::{self, dom_error};
use embed_core::{EmbedError, EmbedMessage, EmbedResult, POST_TARGET_ORIGIN};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Post a tagged checkout message to the parent window.
///
/// Any origin may receive it: envelopes only carry lifecycle and
/// navigation signals.
pub fn post_message(message: &EmbedMessage) -> EmbedResult<()> {
    let window = dom::window()?;
    let parent = window
        .parent()
        .map_err(dom_error)?
        .ok_or_else(|| EmbedError::Environment("window has no parent".to_string()))?;

    let envelope = to_js_value(&message.envelope())?;
    parent
        .post_message(&envelope, POST_TARGET_ORIGIN)
        .map_err(dom_error)?;

    tracing::debug!("Posted checkout event: {}", message.event_name());
    Ok(())
}

/// Decode a JS object such as `{ event: "success", successURL, redirect }`
pub(crate) fn message_from_js(value: JsValue) -> EmbedResult<EmbedMessage> {
    serde_wasm_bindgen::from_value(value).map_err(|e| EmbedError::InvalidMessage(e.to_string()))
}

/// Plain JS objects, never `Map`s, so the peer sees ordinary properties
pub(crate) fn to_js_value(value: &serde_json::Value) -> EmbedResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| EmbedError::Serialization(e.to_string()))
}
