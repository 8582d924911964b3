//! # Checkout Links
//!
//! Derivation of the iframe URL from a Checkout Link on the host side, and
//! parsing of the embed query parameters on the checkout side.

use crate::error::{EmbedError, EmbedResult};
use crate::theme::Theme;
use url::Url;

/// Query parameter switching the checkout into embedded mode
pub const EMBED_PARAM: &str = "embed";

/// Query parameter carrying the requested theme
pub const THEME_PARAM: &str = "theme";

/// Derive the URL loaded by the iframe.
///
/// `embed=true` is always forced; `theme` only when one was supplied.
/// Every other component of the Checkout Link is kept as is.
pub fn embed_url(checkout_url: &str, theme: Option<Theme>) -> EmbedResult<Url> {
    let mut url =
        Url::parse(checkout_url).map_err(|e| EmbedError::invalid_url(checkout_url, e))?;

    set_query_param(&mut url, EMBED_PARAM, "true");
    if let Some(theme) = theme {
        set_query_param(&mut url, THEME_PARAM, theme.as_str());
    }

    Ok(url)
}

/// Set a query parameter the way `URLSearchParams.set` does: the first
/// occurrence is replaced in place, later duplicates are dropped, and the
/// pair is appended when absent.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    let mut found = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if found {
            return false;
        }
        found = true;
        *v = value.to_string();
        true
    });

    if !found {
        pairs.push((key.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// Embed parameters as seen by the checkout page itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedParams {
    /// Rendered inside a host page iframe
    pub embed: bool,
    /// Requested theme, if any
    pub theme: Option<Theme>,
}

impl EmbedParams {
    /// Parse from a raw query string (without the leading `?`)
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                EMBED_PARAM => params.embed = value == "true",
                THEME_PARAM => params.theme = Theme::parse_lenient(Some(&value)),
                _ => {}
            }
        }

        params
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query())
    }

    /// Theme to render with, falling back to light
    pub fn theme_or_default(&self) -> Theme {
        self.theme.unwrap_or_default()
    }
}
