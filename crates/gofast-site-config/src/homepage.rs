//! Homepage content: layout metadata and the feature list.

use std::collections::HashSet;

use serde::Deserialize;

/// One entry of the homepage feature list.
///
/// `description` is first-party markup and is rendered without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
}

impl FeatureItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Validated homepage configuration.
#[derive(Debug, Clone)]
pub struct HomepageConfig {
    /// Document title of the homepage.
    pub title: String,
    /// Content of the `<meta name="description">` tag.
    pub description: String,
    /// Feature list in display order.
    pub features: Vec<FeatureItem>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct HomepageFile {
    title: Option<String>,
    description: Option<String>,
    features: Option<Vec<FeatureItem>>,
}

impl HomepageFile {
    pub(crate) fn resolve(self, site_title: &str) -> HomepageConfig {
        let features = self.features.unwrap_or_else(default_features);

        let mut seen = HashSet::new();
        for feature in &features {
            if !seen.insert(feature.title.as_str()) {
                tracing::warn!(
                    "Feature title '{}' is used more than once; titles double as rendering keys",
                    feature.title
                );
            }
        }

        HomepageConfig {
            title: self
                .title
                .unwrap_or_else(|| "Hello from {title}".to_string())
                .replace("{title}", site_title),
            description: self
                .description
                .unwrap_or_else(|| "Description will go into a meta tag in <head />".to_string()),
            features,
        }
    }
}

/// The Gofast feature list used when `site.toml` does not define one.
pub fn default_features() -> Vec<FeatureItem> {
    vec![
        FeatureItem::new(
            "Cut out time-consuming setup work",
            "Gofast creates a fully-functioning application scaffold for you, with all the \
             setup steps and package integrations taken care of. This means you can \
             <strong>get started fast and focus on your application-specific code</strong>, \
             instead of the boring boilerplate.",
        ),
        FeatureItem::new(
            "Tested Application Structure",
            "The generated code gives you a really solid foundation to continue building on, \
             with a structured application, minimal complexity and idiomatic golang code.",
        ),
        FeatureItem::new(
            "You fully control the code",
            "Gofast is not a third-party framework, rather a minimal CLI which only serves the \
             purpose of scaffolding a new golang repository for you. The extension of the \
             starter application fully relies on your preference and choice.",
        ),
        FeatureItem::new(
            "Only the required features",
            "You get to customize your application scaffold to include only the features that \
             you need, which means there will be fewer dependencies resulting in a smaller \
             binary.",
        ),
    ]
}
