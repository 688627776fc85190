//! Homepage composition: hero banner followed by the feature list.

use serde::Serialize;

use gofast_site_config::{Message, SiteConfig, Translate};

use super::features::{render_features, FeatureBlock};
use super::hero::{HeroContent, HERO_CTA, HERO_TITLE};

/// Every message the homepage looks up, for `write-translations`.
pub const MESSAGES: &[Message] = &[HERO_TITLE, HERO_CTA];

/// Document-level metadata handed to the layout shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

/// The composed homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
    pub hero: HeroContent,
    pub features: Vec<FeatureBlock>,
}

impl HomePage {
    pub fn compose(site: &SiteConfig, translator: &impl Translate) -> Self {
        Self {
            meta: PageMeta {
                title: site.homepage.title.clone(),
                description: Some(site.homepage.description.clone()),
            },
            hero: HeroContent::compose(site, translator),
            features: render_features(&site.homepage.features),
        }
    }
}
