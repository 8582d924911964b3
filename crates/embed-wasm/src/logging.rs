//! Browser console sink for `tracing` events.
//!
//! `tracing` is built with its `log` feature, so without a subscriber every
//! event is forwarded to the `log` facade and printed by `console_log`.

use std::sync::Once;

static INIT: Once = Once::new();

pub(crate) fn init() {
    INIT.call_once(|| {
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        // Another logger may already be installed by the host bundle
        let _ = console_log::init_with_level(level);
    });
}
