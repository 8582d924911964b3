//! # Routes
//!
//! Axum router configuration for the development host.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET /health - Health check
/// - GET / - Demo merchant page
/// - GET /checkout/{link_id} - Fixture checkout
/// - GET /checkout/{link_id}/confirmation - Post-checkout landing page
/// - GET /embed/* - wasm-pack bundle
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let checkout_routes = Router::new()
        .route("/{link_id}", get(handlers::fixture_checkout))
        .route("/{link_id}/confirmation", get(handlers::confirmation));

    let bundle = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::demo_page))
        .nest("/checkout", checkout_routes)
        .nest_service("/embed", bundle)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use embed_core::{EmbedMessage, Inbound};
    use serde_json::Value;
    use std::path::PathBuf;

    fn server() -> TestServer {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "test".to_string(),
            assets_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        };
        TestServer::new(create_router(AppState::new(config))).unwrap()
    }

    /// Pull the inline envelope passed to `send(...)` for a given button
    fn envelope_after(page: &str, marker: &str) -> Value {
        let start = page.find(marker).unwrap() + marker.len();
        let rest = &page[start..];
        let body = &rest[rest.find("send(").unwrap() + "send(".len()..];
        let end = body.find("));").unwrap();
        serde_json::from_str(&body[..end]).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = server().get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_demo_page_has_triggers() {
        let response = server().get("/").await;
        response.assert_status_ok();

        let page = response.text();
        assert!(page.contains(r#"<a href="http://localhost:8080/checkout/demo_light" data-polar-checkout>"#));
        assert!(page.contains(r#"data-polar-checkout="http://localhost:8080/checkout/demo_dark" data-polar-checkout-theme="dark""#));
        assert!(page.contains(r#"<script type="module" data-auto-init>"#));
    }

    #[tokio::test]
    async fn test_fixture_standalone() {
        let response = server().get("/checkout/polar_cl_123").await;
        response.assert_status_ok();

        let page = response.text();
        assert!(page.contains("embed=true"));
        assert!(!page.contains("postMessage"));
    }

    #[tokio::test]
    async fn test_fixture_embedded_speaks_protocol() {
        let response = server()
            .get("/checkout/polar_cl_123")
            .add_query_param("embed", "true")
            .add_query_param("theme", "dark")
            .await;
        response.assert_status_ok();

        let page = response.text();
        assert!(page.contains("background: #0b0b0f"));

        let loaded = envelope_after(&page, r#"addEventListener("load", () => "#);
        assert_eq!(Inbound::decode(&loaded).into_message(), Some(EmbedMessage::Loaded));

        let close = envelope_after(&page, r#"getElementById("close")"#);
        assert_eq!(Inbound::decode(&close).into_message(), Some(EmbedMessage::Close));

        let success = envelope_after(&page, r#"getElementById("pay")"#);
        assert_eq!(
            Inbound::decode(&success).into_message(),
            Some(EmbedMessage::success(
                "http://localhost:8080/checkout/polar_cl_123/confirmation",
                true
            ))
        );

        let in_place = envelope_after(&page, r#"getElementById("pay-in-place")"#);
        assert_eq!(
            Inbound::decode(&in_place).into_message(),
            Some(EmbedMessage::success(
                "http://localhost:8080/checkout/polar_cl_123/confirmation",
                false
            ))
        );
    }

    #[tokio::test]
    async fn test_fixture_unknown_theme_falls_back_to_light() {
        let response = server()
            .get("/checkout/polar_cl_123?embed=true&theme=sepia")
            .await;
        response.assert_status_ok();
        assert!(response.text().contains("background: #ffffff"));
    }

    #[tokio::test]
    async fn test_fixture_rejects_bad_link_id() {
        let response = server().get("/checkout/bad%20id").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_confirmation() {
        let response = server().get("/checkout/polar_cl_123/confirmation").await;
        response.assert_status_ok();
        assert!(response.text().contains("Order Confirmed"));
    }

    #[tokio::test]
    async fn test_bundle_served_from_assets_dir() {
        let response = server().get("/embed/lib.rs").await;
        response.assert_status_ok();
        assert!(response.text().contains("pub mod handlers;"));

        server().get("/embed/missing.js").await.assert_status(StatusCode::NOT_FOUND);
    }
}
