// Localization settings for Lingo
//
// Loads the allow-list, default locale, resource ids and root templates from
// JSON or TOML files and `LINGO_*` environment variables, then sets up the
// message catalogs.

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::EnvOverrides;
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, SettingsLoader};
pub use settings::LocalizationSettings;
pub use validation::Validate;
