//! # checkout-embed-dev
//!
//! Serves a demo host page, a fixture checkout and the embed bundle.
//!
//! ## Usage
//!
//! ```bash
//! # Build the bundle
//! wasm-pack build crates/embed-wasm --target web
//!
//! # Run the server
//! export EMBED_ASSETS_DIR=crates/embed-wasm/pkg
//! checkout-embed-dev
//! ```

use embed_server::{routes, AppConfig, AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new(AppConfig::from_env());

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Bundle directory: {}", state.config.assets_dir.display());
    if !state.config.assets_dir.is_dir() {
        warn!("Bundle directory is missing, run wasm-pack build first");
    }
    if is_prod {
        warn!("checkout-embed-dev is a development host and should not face production traffic");
    }

    let demo_url = format!("{}/", state.config.base_url.trim_end_matches('/'));
    let app = routes::create_router(state);

    info!("Checkout embed dev host starting on http://{}", addr);
    info!("Demo page: {}", demo_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Checkout Embed Dev Host
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
