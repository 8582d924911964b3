//! # Styles
//!
//! Inline styles and the injected style sheet for the embed overlay.
//! Kept as plain data so the DOM layer only has to apply them.

use crate::scroll::NO_SCROLL_CLASS;
use crate::theme::Theme;

/// Class of the pulsing spinner inside the loader
pub const SPINNER_CLASS: &str = "polar-loader-spinner";

/// Marker attribute on injected `<style>` blocks
pub const STYLE_MARKER_ATTR: &str = "data-polar-embed-style";

/// Full-page dimming overlay, below loader and iframe
pub const BACKDROP_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background-color", "rgba(0, 0, 0, 0.2)"),
];

/// Centred loading indicator container
pub const LOADER_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "50%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%)"),
    ("z-index", "1000"),
];

/// Full-viewport, border-less checkout frame
pub const IFRAME_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("border", "none"),
    ("z-index", "1000"),
];

/// Style sheet injected once per session
pub fn style_sheet(theme: Option<Theme>) -> String {
    let theme = theme.unwrap_or_default();
    format!(
        r#"
.{spinner} {{
  width: 20px;
  aspect-ratio: 1;
  border-radius: 50%;
  background: {fill};
  box-shadow: 0 0 0 0 {ring};
  animation: polar-loader-spinner-animation 1s infinite;
}}
@keyframes polar-loader-spinner-animation {{
  100% {{box-shadow: 0 0 0 30px #0000}}
}}
body.{no_scroll} {{
  overflow: hidden;
}}
"#,
        spinner = SPINNER_CLASS,
        fill = theme.spinner_fill(),
        ring = theme.spinner_ring(),
        no_scroll = NO_SCROLL_CLASS,
    )
}
