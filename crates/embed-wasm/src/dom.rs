//! DOM helpers shared by the bridge.

use embed_core::{EmbedError, EmbedResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlHeadElement, Window};

pub(crate) fn window() -> EmbedResult<Window> {
    web_sys::window().ok_or_else(|| EmbedError::Environment("no global window".to_string()))
}

pub(crate) fn document() -> EmbedResult<Document> {
    window()?
        .document()
        .ok_or_else(|| EmbedError::Environment("window has no document".to_string()))
}

pub(crate) fn body(document: &Document) -> EmbedResult<HtmlElement> {
    document
        .body()
        .ok_or_else(|| EmbedError::Environment("document has no body".to_string()))
}

pub(crate) fn head(document: &Document) -> EmbedResult<HtmlHeadElement> {
    document
        .head()
        .ok_or_else(|| EmbedError::Environment("document has no head".to_string()))
}

/// Create an element and cast it to its concrete interface
pub(crate) fn create_element<T: JsCast>(document: &Document, tag: &str) -> EmbedResult<T> {
    document
        .create_element(tag)
        .map_err(dom_error)?
        .dyn_into::<T>()
        .map_err(|_| EmbedError::Dom(format!("<{}> has an unexpected interface", tag)))
}

/// Create a detached `<div>` carrying the given inline style
pub(crate) fn create_styled_div(
    document: &Document,
    declarations: &[(&str, &str)],
) -> EmbedResult<HtmlElement> {
    let element: HtmlElement = create_element(document, "div")?;
    apply_style(&element, declarations)?;
    Ok(element)
}

pub(crate) fn apply_style(element: &HtmlElement, declarations: &[(&str, &str)]) -> EmbedResult<()> {
    let style = element.style();
    for (property, value) in declarations {
        style.set_property(property, value).map_err(dom_error)?;
    }
    Ok(())
}

/// Drop a value once the current event dispatch has returned.
///
/// Closures handed to JS must outlive their own invocation, so anything that
/// owns one is released from the microtask queue instead of in place.
pub(crate) fn defer_drop<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}

pub(crate) fn dom_error(value: JsValue) -> EmbedError {
    EmbedError::Dom(js_error_message(&value))
}

pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

/// Convert an embed error into a JS `Error` for the module boundary.
///
/// Runtime faults are logged here; caller errors and load failures are left
/// to the JS caller.
pub fn to_js_error(err: EmbedError) -> JsValue {
    if !err.is_caller_error() && !err.is_load_failure() {
        tracing::error!("Embed bridge fault: {}", err);
    }
    js_sys::Error::new(&err.to_string()).into()
}
