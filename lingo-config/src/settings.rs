// Localization settings

use crate::{EnvOverrides, Result, SettingsLoader, Validate};
use lingo_i18n::{Localization, Roots};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn default_use_isolating() -> bool {
    true
}

/// Everything needed to set up a [`Localization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizationSettings {
    /// Locales the application can serve
    pub allowed_locales: Vec<String>,
    /// Locale used when nothing else matches
    pub default_locale: String,
    /// Resource ids to load per locale, in order
    pub resource_ids: HashMap<String, Vec<String>>,
    /// Root path templates containing `{locale}`
    #[serde(default)]
    pub roots: Roots,
    /// Wrap placeables in Unicode isolation marks
    #[serde(default = "default_use_isolating")]
    pub use_isolating: bool,
}

impl LocalizationSettings {
    /// Create settings with no resources declared.
    pub fn new<I, S>(allowed_locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_locales: allowed_locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.into(),
            resource_ids: HashMap::new(),
            roots: Roots::default(),
            use_isolating: default_use_isolating(),
        }
    }

    /// Declare resource ids for a locale.
    pub fn with_resources<I, S>(mut self, locale: impl Into<String>, resource_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_ids
            .insert(locale.into(), resource_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Set the root path templates.
    pub fn with_roots(mut self, roots: impl Into<Roots>) -> Self {
        self.roots = roots.into();
        self
    }

    /// Load from a JSON or TOML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        SettingsLoader::auto(path)?.load_file(path)
    }

    /// Load from a file, apply `LINGO_*` environment overrides, and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut settings = Self::from_file(path)?;
        let overrides = EnvOverrides::default();
        overrides.load_dotenv(None)?;
        overrides.apply(&mut settings)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate and build the localization, loading every resource.
    pub fn setup(&self) -> Result<Localization> {
        self.validate()?;

        let mut builder = Localization::builder()
            .allowed_locales(self.allowed_locales.iter().cloned())
            .default_locale(self.default_locale.clone())
            .roots(self.roots.clone())
            .use_isolating(self.use_isolating);
        for (locale, resource_ids) in &self.resource_ids {
            builder = builder.resources(locale.clone(), resource_ids.iter().cloned());
        }

        Ok(builder.build()?)
    }
}
