//! Locale Registry and Message Lookup
//!
//! [`Localization`] holds one [`CatalogBundle`] per supported locale. It is
//! built once, before requests are served, and is read-only afterwards.

use crate::bundle::{Args, CatalogBundle, Lookup, split_key};
use crate::loader::{ResourceLoader, Roots, parse_resource};
use crate::locale::{parse_accept_language, resolve_locale};
use crate::{I18nError, Localizer, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Registry of message catalogs keyed by locale tag.
///
/// The default locale is always part of the allow-list and always has a
/// bundle. Lookups never mutate state, so a `Localization` can be shared
/// across request handlers behind an `Arc` without locking.
///
/// # Example
///
/// ```
/// use lingo_i18n::{Localization, l10n_args};
///
/// let l10n = Localization::builder()
///     .allowed_locales(["en", "de"])
///     .default_locale("en")
///     .source("en", "hello = Hello, { $name }!")
///     .source("de", "hello = Hallo, { $name }!")
///     .use_isolating(false)
///     .build()?;
///
/// let args = l10n_args! { "name" => "Ann" };
/// assert_eq!(l10n.gettext("hello", Some(&args), Some("de"))?, "Hallo, Ann!");
/// assert_eq!(l10n.gettext("hello", Some(&args), Some("fr"))?, "Hello, Ann!");
/// assert_eq!(l10n.gettext("unknown", None, None)?, "unknown");
/// # Ok::<(), lingo_i18n::I18nError>(())
/// ```
#[derive(Debug)]
pub struct Localization {
    allowed_locales: Vec<String>,
    default_locale: String,
    bundles: HashMap<String, CatalogBundle>,
}

impl Localization {
    /// Load every resource for every allowed locale.
    ///
    /// The default locale is appended to `allowed_locales` when missing.
    /// Fails if any of these locales has no entry in `resource_ids`, or if a
    /// resource file cannot be read or parsed. Resource files that do not
    /// exist are skipped.
    pub fn setup(
        allowed_locales: Vec<String>,
        default_locale: impl Into<String>,
        resource_ids: HashMap<String, Vec<String>>,
        roots: impl Into<Roots>,
    ) -> Result<Self> {
        let mut builder = Self::builder()
            .allowed_locales(allowed_locales)
            .default_locale(default_locale)
            .roots(roots);
        builder.resource_ids = resource_ids;
        builder.build()
    }

    /// Start building a localization.
    pub fn builder() -> LocalizationBuilder {
        LocalizationBuilder::default()
    }

    /// Get the allowed locales, default locale included.
    pub fn allowed_locales(&self) -> &[String] {
        &self.allowed_locales
    }

    /// Get the default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Check whether a locale is supported.
    pub fn is_allowed(&self, locale: &str) -> bool {
        self.bundles.contains_key(locale)
    }

    /// Map a requested locale to a supported one.
    ///
    /// `None` and unsupported locales resolve to the default locale.
    pub fn resolve_locale<'a>(&'a self, locale: Option<&'a str>) -> &'a str {
        match locale {
            Some(locale) if self.is_allowed(locale) => locale,
            Some(locale) => {
                tracing::debug!(
                    locale,
                    "locale not supported, using default locale '{}'",
                    self.default_locale
                );
                &self.default_locale
            }
            None => &self.default_locale,
        }
    }

    /// Pick a locale for a raw `Accept-Language` header value.
    pub fn negotiate<'a>(&'a self, accept_language: Option<&str>) -> &'a str {
        let Some(header) = accept_language else {
            tracing::debug!(locale = %self.default_locale, "no Accept-Language, using default");
            return &self.default_locale;
        };

        let preferences = parse_accept_language(header);
        let selected = resolve_locale(&preferences, &self.allowed_locales, &self.default_locale);

        // Re-borrow from the registry so the result outlives `preferences`
        let locale = self
            .allowed_locales
            .iter()
            .find(|allowed| allowed.as_str() == selected)
            .map(String::as_str)
            .unwrap_or(&self.default_locale);
        tracing::debug!(locale, "selected locale");
        locale
    }

    /// Bind a locale negotiated from `accept_language` to this registry.
    pub fn localizer(self: &Arc<Self>, accept_language: Option<&str>) -> Localizer {
        let locale = self.negotiate(accept_language).to_string();
        Localizer::new(Arc::clone(self), locale)
    }

    /// Look up a message and report exactly how it resolved.
    ///
    /// Only malformed keys (more than one `.`) are errors.
    pub fn lookup(&self, msg_id: &str, args: Option<&Args>, locale: Option<&str>) -> Result<Lookup> {
        let locale = self.resolve_locale(locale);
        match self.bundles.get(locale) {
            Some(bundle) => bundle.lookup(msg_id, args),
            None => split_key(msg_id).map(|_| Lookup::MissingMessage),
        }
    }

    /// Retrieve a localized message.
    ///
    /// Returns `msg_id` unchanged when the message or attribute is unknown
    /// or formatting fails. Errors only for keys with more than one `.`.
    pub fn gettext(&self, msg_id: &str, args: Option<&Args>, locale: Option<&str>) -> Result<String> {
        let lookup = self.lookup(msg_id, args, locale)?;
        if let Lookup::FormatError(ref errors) = lookup {
            tracing::error!(msg_id, ?errors, "error formatting message");
        }
        Ok(lookup.into_text(msg_id))
    }

    /// Check if a message key resolves in a locale.
    pub fn has_message(&self, msg_id: &str, locale: Option<&str>) -> bool {
        let locale = self.resolve_locale(locale);
        self.bundles
            .get(locale)
            .is_some_and(|bundle| bundle.has_message(msg_id))
    }
}

/// Builder for [`Localization`].
#[derive(Debug, Clone)]
pub struct LocalizationBuilder {
    allowed_locales: Vec<String>,
    default_locale: Option<String>,
    resource_ids: HashMap<String, Vec<String>>,
    sources: HashMap<String, Vec<String>>,
    roots: Roots,
    use_isolating: bool,
}

impl Default for LocalizationBuilder {
    fn default() -> Self {
        Self {
            allowed_locales: Vec::new(),
            default_locale: None,
            resource_ids: HashMap::new(),
            sources: HashMap::new(),
            roots: Roots::default(),
            use_isolating: true,
        }
    }
}

impl LocalizationBuilder {
    /// Set the allowed locales.
    pub fn allowed_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default locale.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Declare resource ids for a locale, in load order.
    pub fn resources<I, S>(mut self, locale: impl Into<String>, resource_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_ids
            .insert(locale.into(), resource_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Add inline FTL source for a locale.
    ///
    /// Inline sources are added after file resources.
    pub fn source(mut self, locale: impl Into<String>, ftl: impl Into<String>) -> Self {
        self.sources.entry(locale.into()).or_default().push(ftl.into());
        self
    }

    /// Set the root path templates.
    pub fn roots(mut self, roots: impl Into<Roots>) -> Self {
        self.roots = roots.into();
        self
    }

    /// Wrap placeables in Unicode isolation marks (on by default).
    pub fn use_isolating(mut self, value: bool) -> Self {
        self.use_isolating = value;
        self
    }

    /// Load all bundles.
    pub fn build(self) -> Result<Localization> {
        let default_locale = self
            .default_locale
            .ok_or_else(|| I18nError::InvalidLocale("missing default locale".to_string()))?;

        let mut allowed_locales = self.allowed_locales;
        if !allowed_locales.contains(&default_locale) {
            allowed_locales.push(default_locale.clone());
        }

        let loader = ResourceLoader::new(self.roots);
        let mut bundles = HashMap::with_capacity(allowed_locales.len());

        for locale in &allowed_locales {
            if bundles.contains_key(locale) {
                continue;
            }

            let resource_ids = self.resource_ids.get(locale);
            let sources = self.sources.get(locale);
            if resource_ids.is_none() && sources.is_none() {
                return Err(I18nError::MissingResources {
                    locale: locale.clone(),
                });
            }

            let mut bundle = CatalogBundle::new(locale)?;
            bundle.set_use_isolating(self.use_isolating);

            if let Some(resource_ids) = resource_ids {
                for resource in loader.resources(locale, resource_ids)? {
                    bundle.add_resource(resource);
                }
            }
            for source in sources.into_iter().flatten() {
                let resource = parse_resource(source.clone(), Path::new("<inline>"), locale);
                bundle.add_resource(resource);
            }

            bundles.insert(locale.clone(), bundle);
        }

        tracing::info!(
            locales = ?allowed_locales,
            default_locale = %default_locale,
            "localization ready"
        );

        Ok(Localization {
            allowed_locales,
            default_locale,
            bundles,
        })
    }
}
