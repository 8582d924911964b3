//! Declarative trigger and peer messaging tests
//!
//! **Run with**: `wasm-pack test --headless --chrome crates/embed-wasm`

#![cfg(target_arch = "wasm32")]

use embed_core::{EmbedMessage, Inbound};
use embed_wasm::{init, post_message, register_global};
use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, MessageEvent, MessageEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn add_trigger(html: &str) -> HtmlElement {
    let document = document();
    let wrapper: Element = document.create_element("div").unwrap();
    wrapper.set_inner_html(html);
    let trigger = wrapper
        .first_element_child()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&trigger).unwrap();
    trigger
}

fn frame_src() -> Option<String> {
    document()
        .query_selector("iframe")
        .unwrap()
        .and_then(|frame| frame.get_attribute("src"))
}

fn send_close() {
    let init = MessageEventInit::new();
    init.set_data(
        &EmbedMessage::Close
            .envelope()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap(),
    );
    let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

async fn settle() {
    TimeoutFuture::new(0).await;
}

// ============================================================================
// init()
// ============================================================================

/// href wins over the marker value, theme comes from the side attribute
#[wasm_bindgen_test]
async fn test_trigger_click_opens_href() {
    let trigger = add_trigger(
        r#"<a href="https://buy.polar.sh/from_href" data-polar-checkout="https://buy.polar.sh/from_marker" data-polar-checkout-theme="dark">Buy</a>"#,
    );

    assert_eq!(init().unwrap(), 1);
    trigger.click();
    settle().await;

    assert_eq!(
        frame_src().as_deref(),
        Some("https://buy.polar.sh/from_href?embed=true&theme=dark")
    );

    send_close();
    settle().await;
    assert!(frame_src().is_none());
    trigger.remove();
}

/// Only elements present at scan time get wired
#[wasm_bindgen_test]
async fn test_init_ignores_late_triggers() {
    let early = add_trigger(r#"<button data-polar-checkout="https://buy.polar.sh/early">Early</button>"#);
    assert_eq!(init().unwrap(), 1);

    let late = add_trigger(r#"<button data-polar-checkout="https://buy.polar.sh/late">Late</button>"#);
    late.click();
    settle().await;
    assert!(frame_src().is_none());

    early.click();
    settle().await;
    assert_eq!(
        frame_src().as_deref(),
        Some("https://buy.polar.sh/early?embed=true")
    );

    send_close();
    settle().await;
    early.remove();
    late.remove();
}

/// A trigger without any link logs and leaves the page alone
#[wasm_bindgen_test]
async fn test_trigger_without_link() {
    let trigger = add_trigger(r#"<button data-polar-checkout>Broken</button>"#);
    assert_eq!(init().unwrap(), 1);

    trigger.click();
    settle().await;
    assert!(frame_src().is_none());
    trigger.remove();
}

// ============================================================================
// Peer side and global registration
// ============================================================================

/// At top level `window.parent` is the window itself, so the envelope comes back to us
#[wasm_bindgen_test]
async fn test_post_message_tags_envelope() {
    let window = web_sys::window().unwrap();
    let (sender, receiver) = oneshot::channel::<serde_json::Value>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let listener = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) {
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(data);
                }
            }
        }) as Box<dyn FnMut(MessageEvent)>)
    };
    window
        .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
        .unwrap();

    post_message(&EmbedMessage::success("https://example.com/done", true)).unwrap();
    let data = receiver.await.unwrap();

    window
        .remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
        .unwrap();

    assert_eq!(data["type"], "POLAR_CHECKOUT");
    assert_eq!(
        Inbound::decode(&data).into_message(),
        Some(EmbedMessage::success("https://example.com/done", true))
    );
}

#[wasm_bindgen_test]
fn test_register_global() {
    register_global().unwrap();

    let window = web_sys::window().unwrap();
    let namespace = js_sys::Reflect::get(&window, &"Polar".into()).unwrap();
    let entry = js_sys::Reflect::get(&namespace, &"EmbedCheckout".into()).unwrap();

    for name in ["create", "createWithOptions", "init", "postMessage"] {
        let function = js_sys::Reflect::get(&entry, &name.into()).unwrap();
        assert!(function.is_function(), "{} should be a function", name);
    }
}
