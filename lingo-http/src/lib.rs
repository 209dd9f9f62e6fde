//! HTTP integration for Lingo
//!
//! Connects inbound requests to a [`Localization`](lingo_i18n::Localization):
//!
//! - [`AcceptLanguage`]: read the raw `Accept-Language` header from
//!   `http::HeaderMap`, `http::Request` or `http::request::Parts`
//! - [`L10n`]: shared handle producing a per-request
//!   [`Localizer`](lingo_i18n::Localizer)
//! - [`LocalizationLayer`]: tower middleware storing the localizer in the
//!   request extensions
//!
//! # Example
//!
//! ```rust,ignore
//! use lingo_http::{L10n, RequestLocalizerExt};
//!
//! let l10n = L10n::new(localization);
//!
//! // Inside a handler
//! let localizer = l10n.localizer_for(&request);
//! let text = localizer.gettext("hello-message", Some(&l10n_args! { "username" => "John" }))?;
//! ```

mod extract;
mod layer;

pub use extract::{AcceptLanguage, L10n};
pub use layer::{LocalizationLayer, LocalizationService, RequestLocalizerExt};
