//! # Theme
//!
//! Visual treatment requested for the embedded checkout.

use crate::error::EmbedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Embedded checkout theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse an optional attribute/query value, dropping anything unrecognized.
    pub fn parse_lenient(value: Option<&str>) -> Option<Theme> {
        let raw = value?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                tracing::warn!("Ignoring unknown checkout theme: {}", raw);
                None
            }
        }
    }

    /// Spinner fill colour drawn over the backdrop
    pub fn spinner_fill(&self) -> &'static str {
        match self {
            Theme::Light => "#fff",
            Theme::Dark => "#000",
        }
    }

    /// Spinner pulse ring colour
    pub fn spinner_ring(&self) -> &'static str {
        match self {
            Theme::Light => "#000",
            Theme::Dark => "#fff",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(EmbedError::InvalidTheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(
            "Dark".parse::<Theme>(),
            Err(EmbedError::InvalidTheme("Dark".into()))
        );
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Theme::parse_lenient(Some("dark")), Some(Theme::Dark));
        assert_eq!(Theme::parse_lenient(Some("sepia")), None);
        assert_eq!(Theme::parse_lenient(None), None);
    }

    #[test]
    fn test_spinner_colours_invert() {
        assert_eq!(Theme::Dark.spinner_fill(), "#000");
        assert_eq!(Theme::Dark.spinner_ring(), "#fff");
        assert_eq!(Theme::default().spinner_fill(), "#fff");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
