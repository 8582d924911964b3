//! # Request Handlers
//!
//! Axum request handlers for the development host: a demo merchant page and
//! a fixture checkout that speaks the embed protocol.

use crate::state::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use embed_core::{
    EmbedMessage, EmbedParams, Theme, AUTO_INIT_ATTR, CHECKOUT_EVENT_TYPE, POST_TARGET_ORIGIN,
    THEME_ATTR, TRIGGER_ATTR,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Longest accepted fixture link id
const MAX_LINK_ID_LEN: usize = 64;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Link ids are rendered into markup and script, so only a safe alphabet passes
fn validate_link_id(link_id: &str) -> Result<(), HandlerError> {
    let valid = !link_id.is_empty()
        && link_id.len() <= MAX_LINK_ID_LEN
        && link_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        warn!(link_id, "Rejected fixture checkout link");
        Err((
            StatusCode::NOT_FOUND,
            Json(
                ErrorResponse::new("Checkout link not found", 404)
                    .with_details("Link ids use letters, digits, '_' and '-'"),
            ),
        ))
    }
}

/// Serialize a value for inlining inside a `<script>` element
fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// Background and text colour for a theme
fn palette(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Light => ("#ffffff", "#111827"),
        Theme::Dark => ("#0b0b0f", "#f3f4f6"),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-embed-dev",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Demo merchant page with one trigger per theme
pub async fn demo_page(State(state): State<AppState>) -> impl IntoResponse {
    let light = state.checkout_link("demo_light");
    let dark = state.checkout_link("demo_dark");

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Checkout Embed Demo</title>
</head>
<body style="font-family: system-ui; max-width: 640px; margin: 60px auto; color: #111827;">
    <h1>Checkout Embed Demo</h1>
    <p>Both buttons open the fixture checkout in an overlay on this page.</p>
    <p>
        <a href="{light}" {trigger}>Buy (light)</a>
    </p>
    <p>
        <button {trigger}="{dark}" {theme}="dark">Buy (dark)</button>
    </p>
    <script type="module" {auto_init}>
        import init from "/embed/embed_wasm.js";
        await init();
    </script>
</body>
</html>
"#,
        light = light,
        dark = dark,
        trigger = TRIGGER_ATTR,
        theme = THEME_ATTR,
        auto_init = AUTO_INIT_ATTR,
    ))
}

/// Fixture checkout page
///
/// Standalone it only renders a notice. With `embed=true` it posts `loaded`
/// once the page has loaded and offers buttons for `close` and `success`.
#[instrument(skip(state, query))]
pub async fn fixture_checkout(
    State(state): State<AppState>,
    Path(link_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, HandlerError> {
    validate_link_id(&link_id)?;

    let params = EmbedParams::from_query(query.as_deref());
    let (background, text) = palette(params.theme_or_default());

    info!(embed = params.embed, theme = %params.theme_or_default(), "Serving fixture checkout");

    if !params.embed {
        return Ok(Html(format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Checkout {link_id}</title></head>
<body style="font-family: system-ui; background: {background}; color: {text}; padding: 40px;">
    <h1>Checkout {link_id}</h1>
    <p>This fixture checkout only talks to a host page when opened with <code>embed=true</code>.</p>
</body>
</html>
"#
        )));
    }

    let confirmation = state.confirmation_url(&link_id);
    let loaded = script_json(&EmbedMessage::Loaded.envelope());
    let close = script_json(&EmbedMessage::Close.envelope());
    let success = script_json(&EmbedMessage::success(confirmation.as_str(), true).envelope());
    let success_in_place = script_json(&EmbedMessage::success(confirmation.as_str(), false).envelope());
    let target = script_json(&Value::from(POST_TARGET_ORIGIN));

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Checkout {link_id}</title></head>
<body style="font-family: system-ui; background: {background}; color: {text}; padding: 40px;" data-event-type="{event_type}">
    <h1>Checkout {link_id}</h1>
    <button id="close">Close</button>
    <button id="pay">Pay and return</button>
    <button id="pay-in-place">Pay and stay</button>
    <script>
        const send = (message) => window.parent.postMessage(message, {target});
        window.addEventListener("load", () => send({loaded}));
        document.getElementById("close").addEventListener("click", () => send({close}));
        document.getElementById("pay").addEventListener("click", () => send({success}));
        document.getElementById("pay-in-place").addEventListener("click", () => send({success_in_place}));
    </script>
</body>
</html>
"#,
        event_type = CHECKOUT_EVENT_TYPE,
    )))
}

/// Where a completed fixture checkout sends the host page
pub async fn confirmation(
    Path(link_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, HandlerError> {
    validate_link_id(&link_id)?;

    let params = EmbedParams::from_query(query.as_deref());
    let (background, text) = palette(params.theme_or_default());

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Order Confirmed</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: {background}; color: {text};">
    <div style="text-align: center;">
        <h1>Order Confirmed</h1>
        <p>Checkout <code>{link_id}</code> completed.</p>
    </div>
</body>
</html>
"#
    )))
}
