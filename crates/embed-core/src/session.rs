//! # Session State Machine
//!
//! Lifecycle of one embedded checkout, independent of the DOM.
//!
//! ```text
//!              loaded                 close msg / close()
//!  ┌─────────┐ ───────▶ ┌──────┐ ─────────────────────▶ ┌────────┐
//!  │ Opening │          │ Open │                        │ Closed │
//!  └─────────┘ ─────────┴──────┴──────────────────────▶ └────────┘
//!              close msg / close() / load timeout
//! ```
//!
//! `success` never changes state. With `redirect: true` it asks the host
//! page to navigate, which supersedes the session entirely.

use crate::error::{EmbedError, EmbedResult};
use crate::message::EmbedMessage;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Iframe injected, waiting for `loaded`
    Opening,
    /// Loaded and visible
    Open,
    /// Torn down (terminal)
    Closed,
}

/// Side effect the DOM layer must carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Remove the loader and resolve the pending creation
    Ready,
    /// Remove every element of the session and release shared resources.
    /// `before_load` is set when the creation is still pending.
    Teardown { before_load: bool },
    /// Navigate the host page
    Redirect(String),
}

#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Opening,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Apply an inbound protocol message
    pub fn handle(&mut self, message: &EmbedMessage) -> Option<SessionAction> {
        match (self.state, message) {
            (SessionState::Closed, _) => None,
            (SessionState::Opening, EmbedMessage::Loaded) => {
                self.state = SessionState::Open;
                Some(SessionAction::Ready)
            }
            (SessionState::Open, EmbedMessage::Loaded) => None,
            (_, EmbedMessage::Close) => Some(self.teardown()),
            (_, EmbedMessage::Success { success_url, redirect }) => {
                if *redirect {
                    Some(SessionAction::Redirect(success_url.clone()))
                } else {
                    None
                }
            }
        }
    }

    /// Explicit close from the caller. A second close is a contract violation.
    pub fn close(&mut self) -> EmbedResult<SessionAction> {
        if self.is_closed() {
            return Err(EmbedError::AlreadyClosed);
        }
        Ok(self.teardown())
    }

    /// The load timeout elapsed. Only meaningful while still opening.
    pub fn time_out(&mut self) -> Option<SessionAction> {
        if self.state == SessionState::Opening {
            Some(self.teardown())
        } else {
            None
        }
    }

    fn teardown(&mut self) -> SessionAction {
        let before_load = self.state == SessionState::Opening;
        self.state = SessionState::Closed;
        SessionAction::Teardown { before_load }
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}
