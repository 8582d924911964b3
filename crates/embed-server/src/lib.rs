//! # embed-server
//!
//! Development host for the checkout embed bundle.
//!
//! This crate provides:
//! - A demo merchant page wired with declarative checkout triggers
//! - A fixture checkout page that speaks the embed protocol
//! - Static serving of the wasm-pack output
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/` | Demo merchant page |
//! | GET | `/checkout/{link_id}` | Fixture checkout |
//! | GET | `/checkout/{link_id}/confirmation` | Post-checkout landing page |
//! | GET | `/embed/*` | wasm-pack bundle |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
