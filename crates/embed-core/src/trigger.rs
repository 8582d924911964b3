//! # Declarative Triggers
//!
//! Markup contract for elements that open the embedded checkout on click:
//!
//! ```html
//! <a href="https://buy.polar.sh/polar_cl_123" data-polar-checkout data-polar-checkout-theme="dark">
//!   Checkout
//! </a>
//! <button data-polar-checkout="https://buy.polar.sh/polar_cl_123">Checkout</button>
//! ```

use crate::error::{EmbedError, EmbedResult};
use crate::theme::Theme;

/// Marker attribute; its value is the fallback Checkout Link
pub const TRIGGER_ATTR: &str = "data-polar-checkout";

/// Optional theme hint on a trigger
pub const THEME_ATTR: &str = "data-polar-checkout-theme";

/// Opt-in attribute on the loader `<script>` element
pub const AUTO_INIT_ATTR: &str = "data-auto-init";

/// Selector matching every trigger element
pub const TRIGGER_SELECTOR: &str = "[data-polar-checkout]";

/// Selector for the loader script when `document.currentScript` is unavailable
pub const AUTO_INIT_SCRIPT_SELECTOR: &str = "script[data-auto-init]";

/// What a trigger element resolves to when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpec {
    pub url: String,
    pub theme: Option<Theme>,
}

impl TriggerSpec {
    /// Resolve a trigger from its raw attribute values.
    ///
    /// A non-empty `href` wins over the marker value.
    pub fn resolve(
        href: Option<&str>,
        marker: Option<&str>,
        theme: Option<&str>,
    ) -> EmbedResult<Self> {
        let url = non_empty(href)
            .or_else(|| non_empty(marker))
            .ok_or(EmbedError::MissingCheckoutUrl)?;

        Ok(Self {
            url: url.to_string(),
            theme: Theme::parse_lenient(non_empty(theme)),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_takes_precedence() {
        let spec = TriggerSpec::resolve(
            Some("https://buy.polar.sh/from_href"),
            Some("https://buy.polar.sh/from_marker"),
            None,
        )
        .unwrap();
        assert_eq!(spec.url, "https://buy.polar.sh/from_href");
    }

    #[test]
    fn test_marker_fallback() {
        let spec =
            TriggerSpec::resolve(None, Some("https://buy.polar.sh/polar_cl_123"), Some("dark"))
                .unwrap();
        assert_eq!(spec.url, "https://buy.polar.sh/polar_cl_123");
        assert_eq!(spec.theme, Some(Theme::Dark));

        // empty href behaves like a missing one
        let spec = TriggerSpec::resolve(Some(""), Some("https://buy.polar.sh/x"), None).unwrap();
        assert_eq!(spec.url, "https://buy.polar.sh/x");
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(
            TriggerSpec::resolve(None, Some(""), Some("dark")),
            Err(EmbedError::MissingCheckoutUrl)
        );
    }

    #[test]
    fn test_unknown_theme_dropped() {
        let spec = TriggerSpec::resolve(Some("https://buy.polar.sh/x"), None, Some("blue")).unwrap();
        assert_eq!(spec.theme, None);
        let spec = TriggerSpec::resolve(Some("https://buy.polar.sh/x"), None, Some("")).unwrap();
        assert_eq!(spec.theme, None);
    }
}
