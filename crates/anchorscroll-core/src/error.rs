#![forbid(unsafe_code)]

use crate::config::ConfigError;

/// Errors surfaced by the listener lifecycle and host setup.
///
/// Click handling has no error path; see [`crate::click::ClickOutcome`].
#[derive(Debug)]
pub enum AnchorScrollError {
    /// `attach()` called while a listener is already registered.
    AlreadyAttached,
    /// The platform refused to register the click listener.
    ListenerRegistration(String),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl std::fmt::Display for AnchorScrollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyAttached => f.write_str("anchor click listener is already attached"),
            Self::ListenerRegistration(msg) => {
                write!(f, "failed to register click listener: {msg}")
            }
            Self::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for AnchorScrollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AnchorScrollError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
