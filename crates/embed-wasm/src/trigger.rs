//! # Declarative Triggers
//!
//! Wires `data-polar-checkout` elements to [`EmbedCheckout::create`] and
//! optionally does so automatically once the document has been parsed.

use crate::checkout::EmbedCheckout;
use crate::dom::{self, dom_error};
use embed_core::{
    EmbedOptions, EmbedResult, TriggerSpec, AUTO_INIT_ATTR, AUTO_INIT_SCRIPT_SELECTOR, THEME_ATTR,
    TRIGGER_ATTR, TRIGGER_SELECTOR,
};
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event};

/// Bind a click listener to every trigger currently in the document.
///
/// Elements inserted later are not picked up until `init` runs again.
pub fn init() -> EmbedResult<u32> {
    let document = dom::document()?;
    let triggers = document
        .query_selector_all(TRIGGER_SELECTOR)
        .map_err(dom_error)?;

    let mut bound = 0;
    for index in 0..triggers.length() {
        let Some(element) = triggers
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        bind(&element)?;
        bound += 1;
    }

    info!("Bound {} checkout trigger(s)", bound);
    Ok(bound)
}

fn bind(element: &Element) -> EmbedResult<()> {
    let trigger = element.clone();
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();

        let spec = TriggerSpec::resolve(
            trigger.get_attribute("href").as_deref(),
            trigger.get_attribute(TRIGGER_ATTR).as_deref(),
            trigger.get_attribute(THEME_ATTR).as_deref(),
        );

        match spec {
            Ok(spec) => {
                debug!("Checkout trigger clicked: {}", spec.url);
                let options = EmbedOptions {
                    theme: spec.theme,
                    ..EmbedOptions::default()
                };
                wasm_bindgen_futures::spawn_local(async move {
                    match EmbedCheckout::create(&spec.url, options).await {
                        Ok(_) => {}
                        Err(e) if e.is_load_failure() => info!("Embedded checkout dismissed: {}", e),
                        Err(e) => error!("Embedded checkout failed: {}", e),
                    }
                });
            }
            Err(e) => error!("Invalid checkout trigger: {}", e),
        }
    }) as Box<dyn FnMut(_)>);

    element
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    // Triggers stay wired for the life of the page
    on_click.forget();

    Ok(())
}

/// Run [`init`] once the document is parsed, if the loader script opted in
/// with `data-auto-init`. Returns whether auto-init was scheduled.
pub(crate) fn schedule_auto_init() -> EmbedResult<bool> {
    let document = dom::document()?;

    // Module scripts have no currentScript; fall back to the marked tag
    let opted_in = match document.current_script() {
        Some(script) => script.has_attribute(AUTO_INIT_ATTR),
        None => document
            .query_selector(AUTO_INIT_SCRIPT_SELECTOR)
            .map_err(dom_error)?
            .is_some(),
    };

    if !opted_in {
        return Ok(false);
    }

    if document.ready_state() == "loading" {
        let run = Closure::once_into_js(run_auto_init);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                run.unchecked_ref(),
                &options,
            )
            .map_err(dom_error)?;
    } else {
        run_auto_init();
    }

    Ok(true)
}

fn run_auto_init() {
    if let Err(e) = init() {
        error!("Checkout auto-init failed: {}", e);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::peer::to_js_value;
    use embed_core::EmbedMessage;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::{Document, HtmlElement, MessageEvent, MessageEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        dom::document().unwrap()
    }

    fn add_trigger(url: &str) -> HtmlElement {
        let button: HtmlElement = dom::create_element(&document(), "button").unwrap();
        button.set_attribute(TRIGGER_ATTR, url).unwrap();
        dom::body(&document()).unwrap().append_child(&button).unwrap();
        button
    }

    fn frame_count() -> u32 {
        document().query_selector_all("iframe").unwrap().length()
    }

    fn send_close() {
        let init = MessageEventInit::new();
        init.set_data(&to_js_value(&EmbedMessage::Close.envelope()).unwrap());
        let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
        dom::window().unwrap().dispatch_event(&event).unwrap();
    }

    async fn settle() {
        TimeoutFuture::new(0).await;
    }

    #[wasm_bindgen_test]
    async fn test_auto_init_requires_opt_in() {
        assert!(document()
            .query_selector(AUTO_INIT_SCRIPT_SELECTOR)
            .unwrap()
            .is_none());
        let trigger = add_trigger("https://buy.polar.sh/polar_cl_plain");

        assert_eq!(schedule_auto_init(), Ok(false));

        trigger.click();
        settle().await;
        assert_eq!(frame_count(), 0);
        trigger.remove();
    }

    /// The document is already parsed under the test runner, so binding is immediate
    #[wasm_bindgen_test]
    async fn test_auto_init_binds_after_parse() {
        let script: Element = document().create_element("script").unwrap();
        script.set_attribute(AUTO_INIT_ATTR, "").unwrap();
        dom::head(&document()).unwrap().append_child(&script).unwrap();
        assert_ne!(document().ready_state(), "loading");

        let trigger = add_trigger("https://buy.polar.sh/polar_cl_auto");

        assert_eq!(schedule_auto_init(), Ok(true));

        trigger.click();
        settle().await;
        assert_eq!(frame_count(), 1);
        let src = document()
            .query_selector("iframe")
            .unwrap()
            .unwrap()
            .get_attribute("src");
        assert_eq!(src.as_deref(), Some("https://buy.polar.sh/polar_cl_auto?embed=true"));

        send_close();
        settle().await;
        assert_eq!(frame_count(), 0);

        trigger.remove();
        script.remove();
    }
}
