// Error types for localization settings

use lingo_i18n::I18nError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Localization setup failed: {0}")]
    Setup(#[from] I18nError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
