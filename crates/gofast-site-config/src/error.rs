//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading or validating the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },

    #[error("Site title must not be empty")]
    EmptyTitle,

    #[error("Invalid url '{0}': must be http:// or https:// followed by a host")]
    InvalidUrl(String),

    #[error("Invalid base_url '{0}': must start and end with '/'")]
    InvalidBaseUrl(String),

    #[error("No locales configured")]
    NoLocales,

    #[error("Invalid locale code '{0}'")]
    InvalidLocale(String),

    #[error("Locale '{0}' is listed more than once")]
    DuplicateLocale(String),

    #[error("Default locale '{0}' is not in the locale list")]
    MissingDefaultLocale(String),

    #[error("Invalid link in {context}: {reason}")]
    InvalidLink { context: String, reason: String },
}
