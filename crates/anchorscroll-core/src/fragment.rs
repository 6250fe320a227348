#![forbid(unsafe_code)]

//! Fragment identifiers extracted from `href="#..."` attributes.

use core::fmt;

/// Why an `href` did not yield a usable [`Fragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentError {
    /// The value does not start with `#`.
    NotFragment,
    /// The value is exactly `#`.
    Empty,
    /// The identifier can never name an element (whitespace or NUL).
    Invalid,
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFragment => f.write_str("href is not a fragment reference"),
            Self::Empty => f.write_str("fragment identifier is empty"),
            Self::Invalid => f.write_str("fragment identifier cannot match an element id"),
        }
    }
}

impl std::error::Error for FragmentError {}

/// Identifier portion of a `#fragment` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Parse the value of an anchor's `href` attribute.
    pub fn from_href(href: &str) -> Result<Self, FragmentError> {
        let id = href.strip_prefix('#').ok_or(FragmentError::NotFragment)?;
        if id.is_empty() {
            return Err(FragmentError::Empty);
        }
        if id.chars().any(|ch| ch.is_ascii_whitespace() || ch == '\0') {
            return Err(FragmentError::Invalid);
        }
        Ok(Self(id.to_string()))
    }

    /// Identifier without the leading `#`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
