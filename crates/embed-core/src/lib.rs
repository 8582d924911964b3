//! # embed-core
//!
//! Core types for the checkout-embed bridge. Nothing in here touches the DOM.
//!
//! This crate provides:
//! - `EmbedMessage` and `Inbound` for the cross-window wire protocol
//! - `embed_url` and `EmbedParams` for both ends of the embed query string
//! - `TriggerSpec` for the declarative `data-polar-checkout` markup
//! - `SessionMachine` for the per-embed lifecycle
//! - `ScrollLock` for the shared body scroll lock
//! - `EmbedOptions` for per-call configuration
//! - `EmbedError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use embed_core::{embed_url, EmbedMessage, Inbound, SessionAction, SessionMachine, Theme};
//!
//! let url = embed_url("https://buy.polar.sh/polar_cl_123", Some(Theme::Dark)).unwrap();
//! assert_eq!(url.query(), Some("embed=true&theme=dark"));
//!
//! let mut session = SessionMachine::new();
//! let data = EmbedMessage::Loaded.envelope();
//! if let Inbound::Message(message) = Inbound::decode(&data) {
//!     assert_eq!(session.handle(&message), Some(SessionAction::Ready));
//! }
//! ```

pub mod error;
pub mod link;
pub mod message;
pub mod options;
pub mod scroll;
pub mod session;
pub mod styles;
pub mod theme;
pub mod trigger;

// Re-exports for convenience
pub use error::{EmbedError, EmbedResult};
pub use link::{embed_url, set_query_param, EmbedParams, EMBED_PARAM, THEME_PARAM};
pub use message::{EmbedMessage, Inbound, CHECKOUT_EVENT_TYPE, POST_TARGET_ORIGIN};
pub use options::EmbedOptions;
pub use scroll::{LockChange, ScrollLock, NO_SCROLL_CLASS};
pub use session::{SessionAction, SessionMachine, SessionState};
pub use theme::Theme;
pub use trigger::{
    TriggerSpec, AUTO_INIT_ATTR, AUTO_INIT_SCRIPT_SELECTOR, THEME_ATTR, TRIGGER_ATTR,
    TRIGGER_SELECTOR,
};
