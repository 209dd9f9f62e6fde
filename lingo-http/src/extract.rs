//! Accept-Language extraction
//!
//! The [`AcceptLanguage`] trait reads the raw header from anything that
//! carries request headers. Header names are matched case-insensitively by
//! the `http` crate.

use http::header::ACCEPT_LANGUAGE;
use http::{HeaderMap, Request, request::Parts};
use lingo_i18n::{Localization, Localizer};
use std::sync::Arc;

/// Source of a raw `Accept-Language` header value.
pub trait AcceptLanguage {
    /// Get the header value, or `None` when absent or not valid UTF-8.
    fn accept_language(&self) -> Option<&str>;
}

impl AcceptLanguage for HeaderMap {
    fn accept_language(&self) -> Option<&str> {
        let value = self.get(ACCEPT_LANGUAGE)?;
        match std::str::from_utf8(value.as_bytes()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!("ignoring non-UTF-8 Accept-Language header");
                None
            }
        }
    }
}

impl<B> AcceptLanguage for Request<B> {
    fn accept_language(&self) -> Option<&str> {
        self.headers().accept_language()
    }
}

impl AcceptLanguage for Parts {
    fn accept_language(&self) -> Option<&str> {
        self.headers.accept_language()
    }
}

/// Shared handle to a [`Localization`], owned by the host application.
///
/// Build it once at startup and hand clones to request handlers or to a
/// [`LocalizationLayer`](crate::LocalizationLayer).
#[derive(Debug, Clone)]
pub struct L10n {
    inner: Arc<Localization>,
}

impl L10n {
    /// Wrap a localization.
    pub fn new(localization: Localization) -> Self {
        Self {
            inner: Arc::new(localization),
        }
    }

    /// Get the underlying localization.
    pub fn localization(&self) -> &Arc<Localization> {
        &self.inner
    }

    /// Bind the locale negotiated from a raw header value.
    pub fn localizer(&self, accept_language: Option<&str>) -> Localizer {
        self.inner.localizer(accept_language)
    }

    /// Bind the locale negotiated from a request's headers.
    pub fn localizer_for<R: AcceptLanguage + ?Sized>(&self, source: &R) -> Localizer {
        self.localizer(source.accept_language())
    }
}

impl From<Localization> for L10n {
    fn from(localization: Localization) -> Self {
        Self::new(localization)
    }
}

impl From<Arc<Localization>> for L10n {
    fn from(inner: Arc<Localization>) -> Self {
        Self { inner }
    }
}
