//! `site.toml` parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::homepage::{HomepageConfig, HomepageFile};
use crate::i18n::{I18nConfig, I18nFile};
use crate::link::{FooterConfig, FooterFile, NavbarConfig, NavbarFile};
use crate::policy::ReportingSeverity;

/// Validated, immutable site configuration.
///
/// Only obtainable through [`load`] or [`SiteConfig::from_toml_str`], so every
/// instance has passed validation. Relative paths are resolved against the
/// directory containing `site.toml`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub favicon: Option<String>,
    /// Site origin without a trailing slash, e.g. `https://mahibulhaque.github.io`.
    pub url: String,
    /// Path the site is served under; starts and ends with `/`.
    pub base_url: String,
    pub trailing_slash: Option<bool>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    pub deployment_branch: Option<String>,
    pub on_broken_links: ReportingSeverity,
    pub on_broken_markdown_links: ReportingSeverity,
    pub i18n: I18nConfig,
    pub docs: DocsConfig,
    pub build: BuildSettings,
    pub theme: ThemeConfig,
    pub homepage: HomepageConfig,
    /// Directory containing `site.toml`.
    pub site_dir: PathBuf,
}

/// Docs content settings. Pages are always served under `/docs/`.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Directory holding markdown pages.
    pub dir: PathBuf,
}

/// Output settings. CLI flags may override these per build.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub output_dir: PathBuf,
    pub minify: bool,
    /// Files copied verbatim to the output root.
    pub static_dir: PathBuf,
    /// Extra stylesheets copied to `assets/` and linked from every page.
    pub custom_css: Vec<PathBuf>,
}

/// Syntax highlighting theme names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub light: String,
    pub dark: String,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            light: "github".to_string(),
            dark: "dracula".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeConfig {
    /// Social card image, relative to the static dir.
    pub image: Option<String>,
    pub prism: PrismConfig,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsFile {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildFile {
    output: Option<String>,
    minify: Option<bool>,
    static_dir: Option<String>,
    custom_css: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    image: Option<String>,
    prism: PrismConfig,
    navbar: NavbarFile,
    footer: FooterFile,
}

/// `site.toml` as written by the user.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteFile {
    title: String,
    tagline: String,
    favicon: Option<String>,
    url: String,
    base_url: String,
    trailing_slash: Option<bool>,
    organization_name: Option<String>,
    project_name: Option<String>,
    deployment_branch: Option<String>,
    on_broken_links: ReportingSeverity,
    on_broken_markdown_links: ReportingSeverity,
    i18n: I18nFile,
    docs: DocsFile,
    build: BuildFile,
    theme: ThemeFile,
    homepage: HomepageFile,
}

impl Default for SiteFile {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            favicon: None,
            url: "http://localhost".to_string(),
            base_url: "/".to_string(),
            trailing_slash: None,
            organization_name: None,
            project_name: None,
            deployment_branch: None,
            on_broken_links: ReportingSeverity::Throw,
            on_broken_markdown_links: ReportingSeverity::Warn,
            i18n: I18nFile::default(),
            docs: DocsFile::default(),
            build: BuildFile::default(),
            theme: ThemeFile::default(),
            homepage: HomepageFile::default(),
        }
    }
}

impl SiteFile {
    fn validate(self, site_dir: &Path) -> Result<SiteConfig, ConfigError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ConfigError::EmptyTitle);
        }

        let host = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default();
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidUrl(self.url));
        }
        let url = self.url.trim_end_matches('/').to_string();

        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }

        let i18n = self.i18n.validate(site_dir.join("i18n"))?;
        let navbar = self.theme.navbar.validate()?;
        let footer = self.theme.footer.validate()?;
        let homepage = self.homepage.resolve(&title);

        let resolve = |value: Option<&str>, default: &str| site_dir.join(value.unwrap_or(default));

        Ok(SiteConfig {
            title,
            tagline: self.tagline,
            favicon: self.favicon,
            url,
            base_url: self.base_url,
            trailing_slash: self.trailing_slash,
            organization_name: self.organization_name,
            project_name: self.project_name,
            deployment_branch: self.deployment_branch,
            on_broken_links: self.on_broken_links,
            on_broken_markdown_links: self.on_broken_markdown_links,
            i18n,
            docs: DocsConfig {
                dir: resolve(self.docs.dir.as_deref(), "docs"),
            },
            build: BuildSettings {
                output_dir: resolve(self.build.output.as_deref(), "build"),
                minify: self.build.minify.unwrap_or(true),
                static_dir: resolve(self.build.static_dir.as_deref(), "static"),
                custom_css: self
                    .build
                    .custom_css
                    .iter()
                    .map(|css| site_dir.join(css))
                    .collect(),
            },
            theme: ThemeConfig {
                image: self.theme.image,
                prism: self.theme.prism,
                navbar,
                footer,
            },
            homepage,
            site_dir: site_dir.to_path_buf(),
        })
    }
}

impl SiteConfig {
    /// Parse and validate configuration text.
    ///
    /// `site_dir` anchors relative paths; `origin` names the source in errors.
    pub fn from_toml_str(source: &str, site_dir: &Path, origin: &Path) -> Result<Self, ConfigError> {
        let file: SiteFile = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate(site_dir)
    }

    /// Title shown in the navbar.
    pub fn navbar_title(&self) -> &str {
        self.theme.navbar.title.as_deref().unwrap_or(&self.title)
    }

    /// URL prefix for pages of `locale`: the base URL for the default
    /// locale, `<base_url><locale>/` for the others.
    pub fn locale_prefix(&self, locale: &str) -> String {
        if self.i18n.is_default(locale) {
            self.base_url.clone()
        } else {
            format!("{}{}/", self.base_url, locale)
        }
    }

    /// Absolute URL for a path that already includes the base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

/// Load and validate `site.toml`.
pub fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let site_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let config = SiteConfig::from_toml_str(&content, site_dir, path)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{LinkTarget, NavbarTarget};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const GOFAST_SITE: &str = r#"
title = "Gofast"
tagline = "Effortlessly generate the ideal application scaffold for your Go web application or API."
favicon = "img/favicon.ico"
url = "https://mahibulhaque.github.io/"
base_url = "/gofast/"
trailing_slash = false
organization_name = "mahibulhaque"
project_name = "gofast"
deployment_branch = "gh-pages"
on_broken_links = "throw"
on_broken_markdown_links = "warn"

[i18n]
default_locale = "en"
locales = ["en"]

[theme]
image = "img/gofast-social-card.jpg"

[theme.navbar]
title = "Gofast"
logo = { alt = "My Site Logo", src = "img/logo.svg" }

[[theme.navbar.items]]
type = "doc_sidebar"
label = "Docs"
position = "left"

[[theme.navbar.items]]
href = "https://github.com/mahibulhaque/gofast"
label = "GitHub"
position = "right"

[theme.footer]
style = "dark"
copyright = "Copyright © {year}. Built with ❤  by Mahibul Haque"

[[theme.footer.links]]
title = "Learn"
items = [
  { label = "Introduction", to = "/docs/intro" },
  { label = "Installation", to = "/docs/installation" },
]
"#;

    fn parse(source: &str) -> Result<SiteConfig, ConfigError> {
        SiteConfig::from_toml_str(source, Path::new("/site"), Path::new("site.toml"))
    }

    #[test]
    fn parses_gofast_site() {
        let config = parse(GOFAST_SITE).unwrap();

        assert_eq!(config.title, "Gofast");
        assert_eq!(config.url, "https://mahibulhaque.github.io");
        assert_eq!(config.base_url, "/gofast/");
        assert_eq!(config.trailing_slash, Some(false));
        assert_eq!(config.on_broken_links, ReportingSeverity::Throw);
        assert_eq!(config.on_broken_markdown_links, ReportingSeverity::Warn);
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.theme.prism.light, "github");
        assert_eq!(config.theme.prism.dark, "dracula");
        assert_eq!(config.theme.navbar.items.len(), 2);
        assert_eq!(config.theme.navbar.items[0].target, NavbarTarget::DocSidebar);
        assert_eq!(
            config.theme.footer.links[0].items[1].target,
            LinkTarget::Internal("/docs/installation".to_string())
        );
        assert_eq!(config.homepage.title, "Hello from Gofast");
    }

    #[test]
    fn resolves_paths_against_site_dir() {
        let config = parse(GOFAST_SITE).unwrap();

        assert_eq!(config.docs.dir, PathBuf::from("/site/docs"));
        assert_eq!(config.build.output_dir, PathBuf::from("/site/build"));
        assert_eq!(config.build.static_dir, PathBuf::from("/site/static"));
        assert_eq!(config.i18n.dir, PathBuf::from("/site/i18n"));
        assert!(config.build.minify);
    }

    #[test]
    fn applies_defaults_for_minimal_config() {
        let config = parse("title = \"Docs\"").unwrap();

        assert_eq!(config.base_url, "/");
        assert_eq!(config.on_broken_links, ReportingSeverity::Throw);
        assert_eq!(config.on_broken_markdown_links, ReportingSeverity::Warn);
        assert_eq!(config.i18n.locales, vec!["en".to_string()]);
        assert_eq!(config.homepage.features.len(), 4);
        assert_eq!(config.navbar_title(), "Docs");
    }

    #[test]
    fn rejects_empty_title() {
        assert!(matches!(parse("tagline = \"x\""), Err(ConfigError::EmptyTitle)));
    }

    #[test]
    fn rejects_malformed_base_url() {
        let err = parse("title = \"Docs\"\nbase_url = \"/gofast\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn rejects_url_without_scheme() {
        let err = parse("title = \"Docs\"\nurl = \"example.com\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_url_without_host() {
        for url in ["https://", "http:///", "https:// /docs"] {
            let err = parse(&format!("title = \"Docs\"\nurl = \"{}\"", url)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUrl(_)), "{}", url);
        }
        let config = parse("title = \"Docs\"\nurl = \"http://localhost:3000/\"").unwrap();
        assert_eq!(config.url, "http://localhost:3000");
    }

    #[test]
    fn rejects_default_locale_outside_list() {
        let err = parse(
            r#"
title = "Docs"
[i18n]
default_locale = "fr"
locales = ["en"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefaultLocale(_)));
    }

    #[test]
    fn rejects_malformed_footer_link() {
        let err = parse(
            r#"
title = "Docs"
[[theme.footer.links]]
title = "Learn"
items = [{ label = "Intro", to = "docs/intro" }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLink { .. }));
    }

    #[test]
    fn rejects_unknown_broken_link_policy() {
        let err = parse("title = \"Docs\"\non_broken_links = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn computes_locale_prefixes() {
        let config = parse(
            r#"
title = "Docs"
base_url = "/gofast/"
[i18n]
default_locale = "en"
locales = ["en", "fr"]
"#,
        )
        .unwrap();

        assert_eq!(config.locale_prefix("en"), "/gofast/");
        assert_eq!(config.locale_prefix("fr"), "/gofast/fr/");
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, GOFAST_SITE).unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.site_dir, temp.path());
        assert_eq!(config.docs.dir, temp.path().join("docs"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempdir().unwrap();
        let err = load(&temp.path().join("site.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
