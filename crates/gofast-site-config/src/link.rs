//! Navbar and footer link configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A route of this site, relative to the base URL (always starts with `/`).
    Internal(String),
    /// An absolute URL outside the site.
    External(String),
}

impl LinkTarget {
    /// Build a target from the `to`/`href` pair of a config entry.
    ///
    /// Exactly one of the two must be set.
    pub fn parse(context: &str, to: Option<&str>, href: Option<&str>) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidLink {
            context: context.to_string(),
            reason: reason.to_string(),
        };

        match (to, href) {
            (Some(_), Some(_)) => Err(invalid("set either 'to' or 'href', not both")),
            (None, None) => Err(invalid("missing 'to' or 'href'")),
            (Some(to), None) => {
                if !to.starts_with('/') {
                    return Err(invalid(&format!("internal link '{}' must start with '/'", to)));
                }
                Ok(Self::Internal(to.to_string()))
            }
            (None, Some(href)) => {
                let allowed = ["http://", "https://", "mailto:"];
                if !allowed.iter().any(|scheme| href.starts_with(scheme)) {
                    return Err(invalid(&format!(
                        "external link '{}' must be an absolute http(s) or mailto URL",
                        href
                    )));
                }
                Ok(Self::External(href.to_string()))
            }
        }
    }
}

/// Side of the navbar an item is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// Target of a navbar item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarTarget {
    /// First page of the docs sidebar, resolved at build time.
    DocSidebar,
    Link(LinkTarget),
}

/// A validated navbar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarItem {
    pub label: String,
    pub position: NavbarPosition,
    pub target: NavbarTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Logo {
    pub alt: String,
    pub src: String,
}

/// Validated navbar configuration.
#[derive(Debug, Clone, Default)]
pub struct NavbarConfig {
    /// Title shown next to the logo; falls back to the site title.
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Dark,
    Light,
}

impl FooterStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub label: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLinkGroup {
    pub title: String,
    pub items: Vec<FooterLink>,
}

/// Validated footer configuration.
#[derive(Debug, Clone, Default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub links: Vec<FooterLinkGroup>,
    /// Copyright line; `{year}` is replaced with the build year.
    pub copyright: Option<String>,
}

impl FooterConfig {
    /// Copyright line for the given year, if one is configured.
    pub fn copyright_for_year(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|line| line.replace("{year}", &year.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum NavbarItemKind {
    #[default]
    Link,
    DocSidebar,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavbarItemFile {
    #[serde(rename = "type", default)]
    kind: NavbarItemKind,
    label: String,
    #[serde(default)]
    position: NavbarPosition,
    to: Option<String>,
    href: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct NavbarFile {
    title: Option<String>,
    logo: Option<Logo>,
    items: Vec<NavbarItemFile>,
}

impl NavbarFile {
    pub(crate) fn validate(self) -> Result<NavbarConfig, ConfigError> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                let target = match item.kind {
                    NavbarItemKind::DocSidebar => NavbarTarget::DocSidebar,
                    NavbarItemKind::Link => NavbarTarget::Link(LinkTarget::parse(
                        &format!("navbar item '{}'", item.label),
                        item.to.as_deref(),
                        item.href.as_deref(),
                    )?),
                };
                Ok(NavbarItem {
                    label: item.label,
                    position: item.position,
                    target,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(NavbarConfig {
            title: self.title,
            logo: self.logo,
            items,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FooterLinkFile {
    label: String,
    to: Option<String>,
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FooterLinkGroupFile {
    title: String,
    #[serde(default)]
    items: Vec<FooterLinkFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct FooterFile {
    style: FooterStyle,
    links: Vec<FooterLinkGroupFile>,
    copyright: Option<String>,
}

impl FooterFile {
    pub(crate) fn validate(self) -> Result<FooterConfig, ConfigError> {
        let mut links = Vec::with_capacity(self.links.len());

        for group in self.links {
            let items = group
                .items
                .into_iter()
                .map(|item| {
                    let target = LinkTarget::parse(
                        &format!("footer group '{}', item '{}'", group.title, item.label),
                        item.to.as_deref(),
                        item.href.as_deref(),
                    )?;
                    Ok(FooterLink {
                        label: item.label,
                        target,
                    })
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;

            links.push(FooterLinkGroup {
                title: group.title,
                items,
            });
        }

        Ok(FooterConfig {
            style: self.style,
            links,
            copyright: self.copyright,
        })
    }
}
