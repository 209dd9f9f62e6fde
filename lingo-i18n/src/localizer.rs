//! Per-request message lookup bound to a resolved locale

use crate::{Args, Localization, Result};
use std::sync::Arc;

/// A [`Localization`] handle bound to one locale.
///
/// Created once per request after locale negotiation; every call performs a
/// synchronous lookup in the bound locale. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Localizer {
    l10n: Arc<Localization>,
    locale: String,
}

impl Localizer {
    /// Bind `locale` to a localization. Unsupported locales resolve to the
    /// default locale at lookup time.
    pub fn new(l10n: Arc<Localization>, locale: impl Into<String>) -> Self {
        Self {
            l10n,
            locale: locale.into(),
        }
    }

    /// Get the bound locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get the underlying localization.
    pub fn localization(&self) -> &Arc<Localization> {
        &self.l10n
    }

    /// Retrieve a localized message in the bound locale.
    pub fn gettext(&self, msg_id: &str, args: Option<&Args>) -> Result<String> {
        self.l10n.gettext(msg_id, args, Some(&self.locale))
    }

    /// Retrieve a localized message without arguments.
    pub fn t(&self, msg_id: &str) -> Result<String> {
        self.gettext(msg_id, None)
    }
}
