//! Error types for localization.

use thiserror::Error;

/// Errors that can occur while building or querying the catalogue.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier.
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to parse a Fluent resource.
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParse {
        /// Locale of the resource.
        locale: String,
        /// Parser diagnostics.
        errors: Vec<String>,
    },

    /// Message not found in the bundle.
    #[error("Message not found: {key}")]
    MessageNotFound {
        /// Message id.
        key: String,
    },

    /// Failed to format a message.
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormat {
        /// Message id.
        key: String,
        /// Formatter diagnostics.
        errors: Vec<String>,
    },
}

/// Result type for localization operations.
pub type I18nResult<T> = Result<T, I18nError>;
