//! # Embedded Checkout
//!
//! Injects the checkout iframe into the host page and drives one session
//! through its lifecycle:
//!
//! 1. style block, backdrop and loader are attached, the body scroll lock is taken
//! 2. the iframe is pointed at the embed URL
//! 3. the session listens on the window for tagged checkout messages
//! 4. `loaded` removes the loader and resolves `create`
//! 5. `close` (or `EmbedCheckout::close`) removes everything again
//!
//! Each session owns its message subscription, so several sessions can be
//! open at once without stepping on each other.

use crate::dom::{self, defer_drop, dom_error, to_js_error};
use crate::peer;
use crate::scroll;
use crate::subscription::MessageSubscription;
use embed_core::styles::{
    style_sheet, BACKDROP_STYLE, IFRAME_STYLE, LOADER_STYLE, SPINNER_CLASS, STYLE_MARKER_ATTR,
};
use embed_core::{
    embed_url, EmbedError, EmbedOptions, EmbedResult, Inbound, SessionAction, SessionMachine,
    SessionState, Theme,
};
use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlHeadElement, HtmlIFrameElement, HtmlStyleElement, MessageEvent};

/// Performs host page navigation for `success` messages with `redirect: true`
pub trait Navigator {
    fn navigate(&self, url: &str) -> EmbedResult<()>;
}

/// Navigates by assigning `window.location.href`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, url: &str) -> EmbedResult<()> {
        dom::window()?.location().set_href(url).map_err(dom_error)
    }
}

thread_local! {
    static NEXT_SESSION_ID: Cell<u32> = const { Cell::new(1) };
}

fn next_session_id() -> u32 {
    NEXT_SESSION_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    })
}

type SharedSession = Rc<RefCell<Session>>;

struct Session {
    id: u32,
    machine: SessionMachine,
    body: HtmlElement,
    style: HtmlStyleElement,
    backdrop: HtmlElement,
    loader: Option<HtmlElement>,
    iframe: HtmlIFrameElement,
    holds_scroll_lock: bool,
    subscription: Option<MessageSubscription>,
    timer: Option<Timeout>,
    pending: Option<oneshot::Sender<EmbedResult<()>>>,
    navigator: Rc<dyn Navigator>,
}

impl Session {
    /// Create every element detached from the document
    fn build(
        document: &Document,
        options: &EmbedOptions,
        src: &str,
        navigator: Rc<dyn Navigator>,
        pending: oneshot::Sender<EmbedResult<()>>,
    ) -> EmbedResult<Self> {
        let body = dom::body(document)?;

        let style: HtmlStyleElement = dom::create_element(document, "style")?;
        style
            .set_attribute(STYLE_MARKER_ATTR, "")
            .map_err(dom_error)?;
        style.set_text_content(Some(&style_sheet(options.theme)));

        let backdrop = dom::create_styled_div(document, BACKDROP_STYLE)?;

        let loader = dom::create_styled_div(document, LOADER_STYLE)?;
        let spinner: HtmlElement = dom::create_element(document, "div")?;
        spinner.set_class_name(SPINNER_CLASS);
        loader.append_child(&spinner).map_err(dom_error)?;

        let iframe: HtmlIFrameElement = dom::create_element(document, "iframe")?;
        iframe.set_src(src);
        dom::apply_style(&iframe, IFRAME_STYLE)?;

        Ok(Self {
            id: next_session_id(),
            machine: SessionMachine::new(),
            body,
            style,
            backdrop,
            loader: Some(loader),
            iframe,
            holds_scroll_lock: false,
            subscription: None,
            timer: None,
            pending: Some(pending),
            navigator,
        })
    }

    fn attach(&mut self, head: &HtmlHeadElement) -> EmbedResult<()> {
        head.append_child(&self.style).map_err(dom_error)?;
        self.body.append_child(&self.backdrop).map_err(dom_error)?;
        if let Some(loader) = &self.loader {
            self.body.append_child(loader).map_err(dom_error)?;
        }

        scroll::acquire(&self.body)?;
        self.holds_scroll_lock = true;

        self.body.append_child(&self.iframe).map_err(dom_error)?;
        Ok(())
    }

    /// Messages carrying a source window must come from our own frame
    fn is_from_frame(&self, event: &MessageEvent) -> bool {
        match (event.source(), self.iframe.content_window()) {
            (Some(source), Some(frame)) => js_sys::Object::is(source.as_ref(), frame.as_ref()),
            _ => true,
        }
    }

    fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Ready => {
                if let Some(loader) = self.loader.take() {
                    loader.remove();
                }
                self.cancel_timer();
                info!(session = self.id, "Embedded checkout loaded");
                self.settle(Ok(()));
            }
            SessionAction::Teardown { before_load } => {
                self.release();
                info!(session = self.id, before_load, "Embedded checkout closed");
                if before_load {
                    self.settle(Err(EmbedError::ClosedBeforeLoad));
                }
            }
            SessionAction::Redirect(url) => {
                info!(session = self.id, "Checkout succeeded, redirecting to {}", url);
                if let Err(e) = self.navigator.navigate(&url) {
                    error!(session = self.id, "Redirect to {} failed: {}", url, e);
                }
            }
        }
    }

    fn close(&mut self) -> EmbedResult<()> {
        let action = self.machine.close()?;
        self.apply(action);
        Ok(())
    }

    /// Detach every element and give back shared resources.
    /// Tolerates the loader being present or already gone.
    fn release(&mut self) {
        if let Some(loader) = self.loader.take() {
            loader.remove();
        }
        self.iframe.remove();
        self.backdrop.remove();
        self.style.remove();

        if self.holds_scroll_lock {
            self.holds_scroll_lock = false;
            if let Err(e) = scroll::release(&self.body) {
                warn!(session = self.id, "Failed to release scroll lock: {}", e);
            }
        }

        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.cancel_timer();
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            defer_drop(timer);
        }
    }

    fn settle(&mut self, outcome: EmbedResult<()>) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.send(outcome);
        }
    }
}

fn on_message(session: &SharedSession, event: MessageEvent) {
    // Transferables and other non-JSON payloads cannot be ours
    let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) else {
        return;
    };

    let message = match Inbound::decode(&data) {
        Inbound::Foreign => return,
        Inbound::Unrecognized(reason) => {
            debug!("Ignoring unrecognized checkout message: {}", reason);
            return;
        }
        Inbound::Message(message) => message,
    };

    let Ok(mut session) = session.try_borrow_mut() else {
        warn!("Checkout message arrived while its session was busy");
        return;
    };

    if !session.is_from_frame(&event) {
        debug!(session = session.id, "Ignoring checkout message from another frame");
        return;
    }

    debug!(session = session.id, "Checkout event: {}", message.event_name());
    if let Some(action) = session.machine.handle(&message) {
        session.apply(action);
    }
}

fn on_timeout(session: &SharedSession, timeout_ms: u32) {
    let Ok(mut session) = session.try_borrow_mut() else {
        return;
    };

    if let Some(action) = session.machine.time_out() {
        warn!(session = session.id, "Checkout did not load within {} ms", timeout_ms);
        session.settle(Err(EmbedError::TimedOut { timeout_ms }));
        session.apply(action);
    }
}

/// Handle to an embedded checkout that has finished loading
#[wasm_bindgen]
pub struct EmbedCheckout {
    session: SharedSession,
}

impl EmbedCheckout {
    /// Embed a Checkout Link and wait for it to signal `loaded`.
    ///
    /// Fails with `InvalidUrl` before anything is added to the page when
    /// `url` is not an absolute URL.
    pub async fn create(url: &str, options: EmbedOptions) -> EmbedResult<Self> {
        Self::create_with_navigator(url, options, Rc::new(LocationNavigator)).await
    }

    /// Same as [`EmbedCheckout::create`] with a custom redirect target
    pub async fn create_with_navigator(
        url: &str,
        options: EmbedOptions,
        navigator: Rc<dyn Navigator>,
    ) -> EmbedResult<Self> {
        let src = embed_url(url, options.theme)?;

        let window = dom::window()?;
        let document = dom::document()?;
        let head = dom::head(&document)?;

        let (sender, receiver) = oneshot::channel();
        let mut session = Session::build(&document, &options, src.as_str(), navigator, sender)?;
        if let Err(e) = session.attach(&head) {
            session.release();
            return Err(e);
        }

        let id = session.id;
        let session = Rc::new(RefCell::new(session));

        let subscription = {
            let session = Rc::clone(&session);
            MessageSubscription::new(&window, move |event| on_message(&session, event))
        };
        match subscription {
            Ok(subscription) => session.borrow_mut().subscription = Some(subscription),
            Err(e) => {
                session.borrow_mut().release();
                return Err(e);
            }
        }

        if let Some(timeout_ms) = options.load_timeout_ms() {
            let weak = Rc::downgrade(&session);
            let timer = Timeout::new(timeout_ms, move || {
                if let Some(session) = weak.upgrade() {
                    on_timeout(&session, timeout_ms);
                }
            });
            session.borrow_mut().timer = Some(timer);
        }

        info!(session = id, "Embedded checkout opening: {}", src);

        match receiver.await {
            Ok(Ok(())) => Ok(Self { session }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(EmbedError::Internal(
                "checkout session dropped before it settled".to_string(),
            )),
        }
    }

    /// Remove the checkout from the page. A second call fails with `AlreadyClosed`.
    pub fn close(&self) -> EmbedResult<()> {
        self.session
            .try_borrow_mut()
            .map_err(|_| EmbedError::Internal("checkout session is busy".to_string()))?
            .close()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().machine.state()
    }
}

#[wasm_bindgen]
impl EmbedCheckout {
    /// `EmbedCheckout.create(url, theme?)`
    #[wasm_bindgen(js_name = create)]
    pub async fn create_js(url: String, theme: Option<String>) -> Result<EmbedCheckout, JsValue> {
        let options = options_with_theme(theme.as_deref()).map_err(to_js_error)?;
        Self::create(&url, options).await.map_err(to_js_error)
    }

    /// `EmbedCheckout.createWithOptions(url, { theme, loadTimeoutMs })`
    #[wasm_bindgen(js_name = createWithOptions)]
    pub async fn create_with_options_js(
        url: String,
        options: JsValue,
    ) -> Result<EmbedCheckout, JsValue> {
        let options = options_from_js(options).map_err(to_js_error)?;
        Self::create(&url, options).await.map_err(to_js_error)
    }

    /// `EmbedCheckout.init()`, returns the number of triggers bound
    #[wasm_bindgen(js_name = init)]
    pub fn init_js() -> Result<u32, JsValue> {
        crate::trigger::init().map_err(to_js_error)
    }

    /// `EmbedCheckout.postMessage({ event, ... })`, checkout side
    #[wasm_bindgen(js_name = postMessage)]
    pub fn post_message_js(message: JsValue) -> Result<(), JsValue> {
        let message = peer::message_from_js(message).map_err(to_js_error)?;
        peer::post_message(&message).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = close)]
    pub fn close_js(&self) -> Result<(), JsValue> {
        self.close().map_err(to_js_error)
    }

    #[wasm_bindgen(getter, js_name = state)]
    pub fn state_js(&self) -> String {
        match self.state() {
            SessionState::Opening => "opening",
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        }
        .to_string()
    }
}

/// Options for the two-argument `create(url, theme?)` form
pub(crate) fn options_with_theme(theme: Option<&str>) -> EmbedResult<EmbedOptions> {
    let theme = theme.map(str::parse::<Theme>).transpose()?;
    Ok(EmbedOptions {
        theme,
        ..EmbedOptions::default()
    })
}

/// `undefined` and `null` mean defaults
pub(crate) fn options_from_js(value: JsValue) -> EmbedResult<EmbedOptions> {
    if value.is_undefined() || value.is_null() {
        return Ok(EmbedOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| EmbedError::Serialization(e.to_string()))
}
