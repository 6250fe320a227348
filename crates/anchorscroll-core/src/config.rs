#![forbid(unsafe_code)]

//! Tunables for the anchor click behavior.
//!
//! Every field has a default matching the stock site behavior, so
//! `AnchorScrollConfig::default()` scrolls smoothly to 80 units above the
//! target and intercepts every click on a fragment link.
//!
//! # Loading
//!
//! ```toml
//! # anchorscroll.toml
//! header_offset = 64.0
//! behavior = "smooth"
//! ignore_modified_clicks = true
//! ```
//!
//! ```rust,ignore
//! let config = AnchorScrollConfig::from_toml_file("anchorscroll.toml")?;
//! let config = AnchorScrollConfig::from_json_str(json)?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::click::ScrollBehavior;

/// Height of the sticky site header, in CSS pixels.
pub const DEFAULT_HEADER_OFFSET: f64 = 80.0;

/// Anchor click configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AnchorScrollConfig {
    /// Distance kept between the viewport top and the scroll target.
    pub header_offset: f64,
    /// Animation style passed to the viewport scroll primitive.
    pub behavior: ScrollBehavior,
    /// Leave clicks with modifier keys or a non-primary button to the browser.
    pub ignore_modified_clicks: bool,
}

impl Default for AnchorScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            behavior: ScrollBehavior::Smooth,
            ignore_modified_clicks: false,
        }
    }
}

impl AnchorScrollConfig {
    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.header_offset.is_finite() {
            errors.push(format!(
                "header_offset must be finite, got {}",
                self.header_offset
            ));
        } else if self.header_offset < 0.0 {
            errors.push(format!(
                "header_offset must be >= 0, got {}",
                self.header_offset
            ));
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load and validate a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a JSON document.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Serialize to JSON (used by hosts that echo the active config).
    #[cfg(feature = "config")]
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Error loading an [`AnchorScrollConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(AnchorScrollConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_catches_negative_offset() {
        let config = AnchorScrollConfig {
            header_offset: -4.0,
            ..AnchorScrollConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("header_offset")));
    }

    #[test]
    fn validate_catches_non_finite_offset() {
        let config = AnchorScrollConfig {
            header_offset: f64::NAN,
            ..AnchorScrollConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            AnchorScrollConfig::from_json_str(r#"{"header_offset":64}"#).expect("valid json");
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.behavior, ScrollBehavior::Smooth);
        assert!(!config.ignore_modified_clicks);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trips_behavior() {
        let config = AnchorScrollConfig::from_toml_str(
            "behavior = \"auto\"\nignore_modified_clicks = true\n",
        )
        .expect("valid toml");
        assert_eq!(config.behavior, ScrollBehavior::Auto);
        assert!(config.ignore_modified_clicks);
        assert_eq!(config.header_offset, DEFAULT_HEADER_OFFSET);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_validation_failure_is_reported() {
        let err = AnchorScrollConfig::from_json_str(r#"{"header_offset":-1}"#)
            .expect_err("negative offset rejected");
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("header_offset"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnchorScrollConfig::from_json_str("not json").expect_err("parse error");
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_file_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("anchorscroll.toml");
        std::fs::write(&path, "header_offset = 96.0\n").expect("write config");
        let config = AnchorScrollConfig::from_toml_file(&path).expect("load file");
        assert_eq!(config.header_offset, 96.0);

        let missing = AnchorScrollConfig::from_toml_file(dir.path().join("missing.toml"))
            .expect_err("missing file");
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
