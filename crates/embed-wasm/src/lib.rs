//! # embed-wasm
//!
//! WebAssembly bridge that embeds a checkout in any host page.
//!
//! This crate provides:
//! - `EmbedCheckout` to open, await and close an embedded checkout
//! - `init` for declarative `data-polar-checkout` triggers
//! - `post_message` for the checkout page to talk back to its host
//! - `EmbedBridge` and `registerGlobal` for module and script-tag consumers
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { EmbedCheckout } from 'checkout-embed';
//!
//! await init();
//!
//! const checkout = await EmbedCheckout.create('https://buy.polar.sh/polar_cl_123', 'dark');
//! // later
//! checkout.close();
//! ```
//!
//! ## Usage (script tag)
//!
//! ```html
//! <a href="https://buy.polar.sh/polar_cl_123" data-polar-checkout data-polar-checkout-theme="dark">
//!   Purchase
//! </a>
//! <script type="module" data-auto-init>
//!   import init from '/embed/embed_wasm.js';
//!   await init();
//! </script>
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/embed-wasm --target web
//! ```

pub mod bridge;
pub mod checkout;
mod dom;
mod logging;
pub mod peer;
pub mod scroll;
mod subscription;
pub mod trigger;

pub use bridge::{bridge, register_global, EmbedBridge};
pub use checkout::{EmbedCheckout, LocationNavigator, Navigator};
pub use dom::to_js_error;
pub use peer::post_message;
pub use trigger::init;

use wasm_bindgen::prelude::*;

/// Module start hook: logging, global registration and auto-init
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init();

    // Workers and other window-less contexts only get the module exports
    if web_sys::window().is_none() {
        return Ok(());
    }

    register_global()?;
    if trigger::schedule_auto_init().map_err(to_js_error)? {
        tracing::debug!("Checkout auto-init scheduled");
    }

    Ok(())
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
