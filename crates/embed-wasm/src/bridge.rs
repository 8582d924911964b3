//! # Bridge Capability
//!
//! `EmbedBridge` is the explicit API object handed to module consumers.
//! `register_global` adapts it onto `window.Polar` for pages that load the
//! bundle without a module system.

use crate::checkout::{options_from_js, options_with_theme, EmbedCheckout};
use crate::dom::{self, to_js_error};
use crate::peer;
use embed_core::{EmbedOptions, EmbedResult};
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Namespace installed on `window`
pub const GLOBAL_NAMESPACE: &str = "Polar";

/// Entry under the namespace
pub const GLOBAL_ENTRY: &str = "EmbedCheckout";

/// Embed capability with default options applied to every `create`
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct EmbedBridge {
    defaults: EmbedOptions,
}

impl EmbedBridge {
    pub fn new(defaults: EmbedOptions) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &EmbedOptions {
        &self.defaults
    }

    /// Fill unset fields of `options` from the bridge defaults
    fn merged(&self, options: EmbedOptions) -> EmbedOptions {
        EmbedOptions {
            theme: options.theme.or(self.defaults.theme),
            load_timeout_ms: options.load_timeout_ms.or(self.defaults.load_timeout_ms),
        }
    }

    fn spawn_create(&self, url: String, options: EmbedResult<EmbedOptions>) -> Promise {
        let options = options.map(|options| self.merged(options));
        future_to_promise(async move {
            let options = options.map_err(to_js_error)?;
            EmbedCheckout::create(&url, options)
                .await
                .map(JsValue::from)
                .map_err(to_js_error)
        })
    }
}

#[wasm_bindgen]
impl EmbedBridge {
    /// Resolves with an `EmbedCheckout` once the checkout has loaded
    pub fn create(&self, url: String, theme: Option<String>) -> Promise {
        self.spawn_create(url, options_with_theme(theme.as_deref()))
    }

    #[wasm_bindgen(js_name = createWithOptions)]
    pub fn create_with_options(&self, url: String, options: JsValue) -> Promise {
        self.spawn_create(url, options_from_js(options))
    }

    pub fn init(&self) -> Result<u32, JsValue> {
        crate::trigger::init().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = postMessage)]
    pub fn post_message(&self, message: JsValue) -> Result<(), JsValue> {
        let message = peer::message_from_js(message).map_err(to_js_error)?;
        peer::post_message(&message).map_err(to_js_error)
    }

    pub fn version(&self) -> String {
        crate::version()
    }
}

/// Build the capability object, optionally with default options
#[wasm_bindgen]
pub fn bridge(defaults: JsValue) -> Result<EmbedBridge, JsValue> {
    let defaults = options_from_js(defaults).map_err(to_js_error)?;
    Ok(EmbedBridge::new(defaults))
}

/// Install `window.Polar.EmbedCheckout = { create, createWithOptions, init, postMessage }`
#[wasm_bindgen(js_name = registerGlobal)]
pub fn register_global() -> Result<(), JsValue> {
    let window = dom::window().map_err(to_js_error)?;
    let bridge = EmbedBridge::default();
    let entry = Object::new();

    let create = {
        let bridge = bridge.clone();
        Closure::wrap(Box::new(move |url: JsValue, theme: JsValue| -> Promise {
            match url.as_string() {
                Some(url) => bridge.create(url, theme.as_string()),
                None => Promise::reject(&js_sys::Error::new("checkout URL must be a string").into()),
            }
        }) as Box<dyn FnMut(JsValue, JsValue) -> Promise>)
    };

    let create_with_options = {
        let bridge = bridge.clone();
        Closure::wrap(Box::new(move |url: JsValue, options: JsValue| -> Promise {
            match url.as_string() {
                Some(url) => bridge.create_with_options(url, options),
                None => Promise::reject(&js_sys::Error::new("checkout URL must be a string").into()),
            }
        }) as Box<dyn FnMut(JsValue, JsValue) -> Promise>)
    };

    let init = {
        let bridge = bridge.clone();
        Closure::wrap(Box::new(move || -> Result<u32, JsValue> { bridge.init() })
            as Box<dyn FnMut() -> Result<u32, JsValue>>)
    };

    let post_message = Closure::wrap(Box::new(move |message: JsValue| -> Result<(), JsValue> {
        bridge.post_message(message)
    }) as Box<dyn FnMut(JsValue) -> Result<(), JsValue>>);

    // Registered functions live for the rest of the page
    Reflect::set(&entry, &"create".into(), &create.into_js_value())?;
    Reflect::set(&entry, &"createWithOptions".into(), &create_with_options.into_js_value())?;
    Reflect::set(&entry, &"init".into(), &init.into_js_value())?;
    Reflect::set(&entry, &"postMessage".into(), &post_message.into_js_value())?;

    let namespace = Object::new();
    Reflect::set(&namespace, &GLOBAL_ENTRY.into(), &entry)?;
    Reflect::set(&window, &GLOBAL_NAMESPACE.into(), &namespace)?;

    tracing::debug!("Registered window.{}.{}", GLOBAL_NAMESPACE, GLOBAL_ENTRY);
    Ok(())
}
