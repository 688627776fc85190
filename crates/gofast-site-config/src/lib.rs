//! Site configuration for the Gofast documentation site.
//!
//! Parses `site.toml`, validates it eagerly, and hands out an immutable
//! [`SiteConfig`]. Anything malformed is reported as a [`ConfigError`] at
//! start-up instead of surfacing half way through a build.
//!
//! Translation catalogs (`i18n/<locale>/code.json`) live in [`i18n`].

pub mod error;
pub mod homepage;
pub mod i18n;
pub mod link;
pub mod policy;
pub mod site;

pub use error::ConfigError;
pub use homepage::{default_features, FeatureItem, HomepageConfig};
pub use i18n::{Catalog, CatalogEntry, I18nConfig, Message, Translate};
pub use link::{
    FooterConfig, FooterLink, FooterLinkGroup, FooterStyle, LinkTarget, Logo, NavbarConfig,
    NavbarItem, NavbarPosition, NavbarTarget,
};
pub use policy::ReportingSeverity;
pub use site::{load, BuildSettings, DocsConfig, PrismConfig, SiteConfig, ThemeConfig};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "site.toml";
