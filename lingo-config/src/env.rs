// Environment variable overrides

use crate::{ConfigError, LocalizationSettings, Result};
use lingo_i18n::Roots;
use std::env;

/// Default prefix for localization environment variables
pub const DEFAULT_PREFIX: &str = "LINGO";

/// Applies `<PREFIX>_*` environment variables on top of file settings.
///
/// Recognized keys: `DEFAULT_LOCALE`, `ALLOWED_LOCALES` and `ROOTS`
/// (comma-separated), `USE_ISOLATING` (`true`/`false`/`1`/`0`).
pub struct EnvOverrides {
    prefix: String,
}

impl EnvOverrides {
    /// Create overrides with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Read a `.env` file (if present) into the process environment
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                // Absence of .env is fine
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }

    fn key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Apply overrides from the process environment
    pub fn apply(&self, settings: &mut LocalizationSettings) -> Result<()> {
        self.apply_with(settings, |key| env::var(key).ok())
    }

    /// Apply overrides using a custom variable source
    pub fn apply_with<F>(&self, settings: &mut LocalizationSettings, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(&self.key("DEFAULT_LOCALE")) {
            tracing::debug!(locale = %locale, "default locale overridden from environment");
            settings.default_locale = locale.trim().to_string();
        }

        if let Some(locales) = lookup(&self.key("ALLOWED_LOCALES")) {
            settings.allowed_locales = split_list(&locales);
        }

        if let Some(roots) = lookup(&self.key("ROOTS")) {
            let mut roots = split_list(&roots);
            settings.roots = if roots.len() == 1 {
                Roots::Single(roots.remove(0))
            } else {
                Roots::Many(roots)
            };
        }

        if let Some(value) = lookup(&self.key("USE_ISOLATING")) {
            settings.use_isolating = parse_bool(&value).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "{} must be a boolean, got '{}'",
                    self.key("USE_ISOLATING"),
                    value
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for EnvOverrides {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
