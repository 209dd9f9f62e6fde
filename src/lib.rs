// Lingo - request localization for HTTP services
//
// Resolves the language of each request from its Accept-Language header and
// renders messages from Fluent catalogs loaded once at startup.

// Re-export core functionality
pub use lingo_i18n::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use lingo_config;

#[cfg(feature = "http")]
pub use lingo_http;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ArgValue, Args, I18nError, LanguagePreference, Localization, LocalizationBuilder,
        Localizer, Lookup, Result, Roots, l10n_args, parse_accept_language, resolve_locale,
    };

    #[cfg(feature = "config")]
    pub use lingo_config::{ConfigError, LocalizationSettings, Validate};

    #[cfg(feature = "http")]
    pub use lingo_http::{AcceptLanguage, L10n, LocalizationLayer, RequestLocalizerExt};
}
