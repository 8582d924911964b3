//! # Embed Options
//!
//! Per-call configuration for `create`. Deserialized from a plain JS object:
//!
//! ```javascript
//! await Polar.EmbedCheckout.createWithOptions(url, { theme: "dark", loadTimeoutMs: 15000 });
//! ```

use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOptions {
    /// Theme forwarded to the checkout; absent keeps the light treatment
    /// and leaves the `theme` query parameter unset.
    #[serde(default)]
    pub theme: Option<Theme>,

    /// Give up on a checkout that never signals `loaded`.
    /// Absent (or zero) waits indefinitely.
    #[serde(default)]
    pub load_timeout_ms: Option<u32>,
}

impl EmbedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Builder: set load timeout in milliseconds
    pub fn with_load_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.load_timeout_ms = Some(timeout_ms);
        self
    }

    /// Effective timeout, if any
    pub fn load_timeout_ms(&self) -> Option<u32> {
        self.load_timeout_ms.filter(|ms| *ms > 0)
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms()
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_wait_forever() {
        let options = EmbedOptions::default();
        assert_eq!(options.theme, None);
        assert_eq!(options.load_timeout(), None);
    }

    #[test]
    fn test_zero_timeout_disabled() {
        let options = EmbedOptions::new().with_load_timeout_ms(0);
        assert_eq!(options.load_timeout_ms(), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: EmbedOptions =
            serde_json::from_str(r#"{ "theme": "dark", "loadTimeoutMs": 1500 }"#).unwrap();
        assert_eq!(options.theme, Some(Theme::Dark));
        assert_eq!(options.load_timeout(), Some(Duration::from_millis(1500)));

        let empty: EmbedOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EmbedOptions::default());
    }
}
