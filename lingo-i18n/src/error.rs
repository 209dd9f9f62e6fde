//! Error types for localization setup and lookup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or querying a [`Localization`](crate::Localization).
///
/// Only setup-time configuration problems and caller contract violations are
/// errors. Missing translations are never reported here; lookups fall back
/// to the message key instead.
#[derive(Debug, Error)]
pub enum I18nError {
    /// An allowed (or the default) locale has no resource ids declared
    #[error("resources for locale '{locale}' not provided")]
    MissingResources { locale: String },

    /// Locale tag rejected by the catalog engine
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    /// A resource file exists but could not be read
    #[error("failed to read resource {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Message key with more than one attribute segment
    #[error("message key '{0}' has too many parts")]
    InvalidKey(String),
}

impl I18nError {
    /// Returns true for caller mistakes surfaced at lookup time.
    pub fn is_usage(&self) -> bool {
        matches!(self, I18nError::InvalidKey(_))
    }

    /// Returns true for errors raised while setting up the catalog.
    pub fn is_configuration(&self) -> bool {
        !self.is_usage()
    }
}
