//! # Application State
//!
//! Shared state for the Axum application: where the bundle lives and how
//! fixture checkout links are addressed.

use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build fixture Checkout Links
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory holding the wasm-pack output served under `/embed`
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            assets_dir: std::env::var("EMBED_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("crates/embed-wasm/pkg")),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Fixture Checkout Link for a link id
    pub fn checkout_link(&self, link_id: &str) -> String {
        format!("{}/checkout/{}", self.config.base_url.trim_end_matches('/'), link_id)
    }

    /// Where a completed fixture checkout sends the host page
    pub fn confirmation_url(&self, link_id: &str) -> String {
        format!("{}/confirmation", self.checkout_link(link_id))
    }
}
