//! Locales and translation catalogs.
//!
//! A catalog lives at `i18n/<locale>/code.json` and maps message ids to entries:
//!
//! ```json
//! {
//!   "homepage.hero.title": {
//!     "message": "The <b>perfect</b> starting point",
//!     "description": "Home page hero title, can contain simple html tags"
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static LOCALE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]+)*$").expect("valid locale regex"));

/// Validated locale configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
    /// Directory holding `<locale>/code.json` catalogs.
    pub dir: PathBuf,
}

impl I18nConfig {
    pub fn is_default(&self, locale: &str) -> bool {
        self.default_locale == locale
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct I18nFile {
    default_locale: String,
    locales: Vec<String>,
}

impl Default for I18nFile {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
        }
    }
}

impl I18nFile {
    pub(crate) fn validate(self, dir: PathBuf) -> Result<I18nConfig, ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::NoLocales);
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            if !LOCALE_CODE.is_match(locale) {
                return Err(ConfigError::InvalidLocale(locale.clone()));
            }
            if !seen.insert(locale.as_str()) {
                return Err(ConfigError::DuplicateLocale(locale.clone()));
            }
        }

        if !seen.contains(self.default_locale.as_str()) {
            return Err(ConfigError::MissingDefaultLocale(self.default_locale));
        }

        Ok(I18nConfig {
            default_locale: self.default_locale,
            locales: self.locales,
            dir,
        })
    }
}

/// A translatable message with its fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Stable identifier used as the catalog key.
    pub id: &'static str,
    /// Default text, used when no translation exists.
    pub message: &'static str,
    /// Note for translators.
    pub description: &'static str,
}

/// Resolves messages to localized text.
pub trait Translate {
    fn translate(&self, message: &Message) -> String;
}

/// One translated message in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Translations for one locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// A catalog without translations; every lookup yields the default message.
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Path of the catalog file for `locale` below `i18n_dir`.
    pub fn path(i18n_dir: &Path, locale: &str) -> PathBuf {
        i18n_dir.join(locale).join("code.json")
    }

    /// Load the catalog for `locale`. A missing file yields an empty catalog.
    pub fn load(i18n_dir: &Path, locale: &str) -> Result<Self, ConfigError> {
        let path = Self::path(i18n_dir, locale);

        if !path.exists() {
            tracing::debug!("No translations for '{}' at {}", locale, path.display());
            return Ok(Self::empty(locale));
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let entries: BTreeMap<String, CatalogEntry> =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded {} translations for '{}'", entries.len(), locale);

        Ok(Self {
            locale: locale.to_string(),
            entries,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add the default text of every message that has no entry yet.
    ///
    /// Existing translations are never overwritten. Returns the number of
    /// entries added.
    pub fn with_defaults(&mut self, messages: &[Message]) -> usize {
        let mut added = 0;
        for message in messages {
            self.entries.entry(message.id.to_string()).or_insert_with(|| {
                added += 1;
                CatalogEntry {
                    message: message.message.to_string(),
                    description: Some(message.description.to_string()),
                }
            });
        }
        added
    }

    /// Write the catalog to its `code.json` below `i18n_dir`.
    pub fn save(&self, i18n_dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = Self::path(i18n_dir, &self.locale);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = to_json(&self.entries, &path)?;

        fs::write(&path, json + "\n").map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

impl Translate for Catalog {
    fn translate(&self, message: &Message) -> String {
        self.entries
            .get(message.id)
            .map(|entry| entry.message.clone())
            .unwrap_or_else(|| message.message.to_string())
    }
}

fn to_json<T: Serialize>(value: &T, path: &Path) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
