// Settings validation

use crate::{ConfigError, LocalizationSettings, Result};
use lingo_i18n::LOCALE_PLACEHOLDER;

/// Trait for validating settings
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn not_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

impl Validate for LocalizationSettings {
    fn validate(&self) -> Result<()> {
        not_empty(&self.default_locale, "default_locale")?;

        for locale in &self.allowed_locales {
            not_empty(locale, "allowed_locales entry")?;
        }

        let mut roots = self.roots.iter().peekable();
        if roots.peek().is_none() {
            return Err(ConfigError::ValidationError(
                "roots must contain at least one path".to_string(),
            ));
        }

        for root in roots {
            not_empty(root, "roots entry")?;
            if !root.contains(LOCALE_PLACEHOLDER) {
                tracing::warn!(root, "root has no {} placeholder, used for every locale", LOCALE_PLACEHOLDER);
            }
        }

        Ok(())
    }
}
