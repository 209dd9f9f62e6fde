//! Request Localization for Lingo
//!
//! Picks a language for an incoming request and renders localized messages:
//!
//! - **Language Preferences**: Parse `Accept-Language` headers into ranked preferences
//! - **Locale Resolution**: Pick the first supported locale, or the default
//! - **Message Catalog**: Load Fluent (`.ftl`) resources per locale, eagerly at setup
//! - **Bound Lookup**: A [`Localizer`] per request, tied to the resolved locale
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lingo_i18n::{Localization, l10n_args};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let resource_ids = HashMap::from([
//!     ("en".to_string(), vec!["main.ftl".to_string()]),
//!     ("fr".to_string(), vec!["main.ftl".to_string()]),
//! ]);
//!
//! // Loads locales/en/main.ftl and locales/fr/main.ftl
//! let l10n = Arc::new(Localization::setup(
//!     vec!["en".to_string(), "fr".to_string()],
//!     "en",
//!     resource_ids,
//!     "locales/{locale}",
//! )?);
//!
//! // Per request
//! let localizer = l10n.localizer(Some("fr-CA,fr;q=0.9,en;q=0.8"));
//! let msg = localizer.gettext("hello-message", Some(&l10n_args! { "username" => "John" }))?;
//! # Ok::<(), lingo_i18n::I18nError>(())
//! ```
//!
//! # Missing Translations
//!
//! Unknown messages, unknown attributes and formatting failures never raise:
//! the message key itself is returned so gaps stay visible in rendered
//! output. Only keys with more than one `.` (e.g. `a.b.c`) are errors.

mod bundle;
mod catalog;
mod error;
mod loader;
mod locale;
mod localizer;

pub use bundle::{ArgValue, Args, CatalogBundle, Lookup, split_key};
pub use catalog::{Localization, LocalizationBuilder};
pub use error::I18nError;
pub use loader::{DEFAULT_ROOT, LOCALE_PLACEHOLDER, ResourceLoader, Roots};
pub use locale::{DEFAULT_WEIGHT, LanguagePreference, parse_accept_language, resolve_locale};
pub use localizer::Localizer;

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ArgValue, Args, I18nError, LanguagePreference, Localization, Localizer, Lookup, Result,
        Roots, l10n_args, parse_accept_language, resolve_locale,
    };
}
