//! Window `message` listener owned by a single session.

use crate::dom::{defer_drop, dom_error};
use embed_core::EmbedResult;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, Window};

const MESSAGE_EVENT: &str = "message";

/// Listener registration that is removed when the subscription goes away
pub(crate) struct MessageSubscription {
    target: Window,
    callback: Option<Closure<dyn FnMut(MessageEvent)>>,
}

impl MessageSubscription {
    pub(crate) fn new(
        target: &Window,
        handler: impl FnMut(MessageEvent) + 'static,
    ) -> EmbedResult<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MessageEvent)>);
        target
            .add_event_listener_with_callback(MESSAGE_EVENT, callback.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        Ok(Self {
            target: target.clone(),
            callback: Some(callback),
        })
    }

    /// Stop listening. Safe to call from inside the listener itself.
    pub(crate) fn cancel(mut self) {
        if let Some(callback) = self.callback.take() {
            self.detach(&callback);
            defer_drop(callback);
        }
    }

    fn detach(&self, callback: &Closure<dyn FnMut(MessageEvent)>) {
        let _ = self
            .target
            .remove_event_listener_with_callback(MESSAGE_EVENT, callback.as_ref().unchecked_ref());
    }
}

impl Drop for MessageSubscription {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            self.detach(&callback);
        }
    }
}
