//! Homepage hero banner.

use serde::Serialize;

use gofast_site_config::{Message, SiteConfig, Translate};

use crate::markup::Html;

/// Route of the introduction docs page, the target of the hero button.
pub const INTRODUCTION_ROUTE: &str = "/docs/intro";

pub const HERO_TITLE: Message = Message {
    id: "homepage.hero.title",
    message: "The <b>perfect</b> starting point, for your <b>Go projects</b>",
    description: "Home page hero title, can contain simple html tags",
};

pub const HERO_CTA: Message = Message {
    id: "homepage.hero.cta",
    message: "Get Started",
    description: "Label of the home page call-to-action button",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub route: &'static str,
}

/// Content of the hero banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroContent {
    /// Translated title; may contain inline tags such as `<b>`.
    pub title: Html,
    pub subtitle: String,
    pub call_to_action: CallToAction,
}

impl HeroContent {
    pub fn compose(site: &SiteConfig, translator: &impl Translate) -> Self {
        Self {
            // Catalogs ship with the site, so their markup is trusted.
            title: Html::trusted(translator.translate(&HERO_TITLE)),
            subtitle: site.tagline.clone(),
            call_to_action: CallToAction {
                label: translator.translate(&HERO_CTA),
                route: INTRODUCTION_ROUTE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofast_site_config::Catalog;
    use std::path::Path;

    fn site(extra: &str) -> SiteConfig {
        let source = format!("title = \"Gofast\"\n{}", extra);
        SiteConfig::from_toml_str(&source, Path::new("."), Path::new("site.toml")).unwrap()
    }

    struct Shouting;

    impl Translate for Shouting {
        fn translate(&self, message: &Message) -> String {
            message.message.to_uppercase()
        }
    }

    #[test]
    fn subtitle_is_tagline_verbatim() {
        let hero = HeroContent::compose(&site("tagline = \"Hello world\""), &Catalog::empty("en"));
        assert_eq!(hero.subtitle, "Hello world");
    }

    #[test]
    fn call_to_action_always_targets_introduction() {
        let configs = [
            site(""),
            site("base_url = \"/gofast/\"\ntrailing_slash = true"),
            site(
                r#"
[homepage]
title = "Custom"
features = []
"#,
            ),
        ];

        for config in &configs {
            let hero = HeroContent::compose(config, &Catalog::empty("en"));
            assert_eq!(hero.call_to_action.route, "/docs/intro");
        }
    }

    #[test]
    fn uses_default_messages_without_translations() {
        let hero = HeroContent::compose(&site(""), &Catalog::empty("en"));

        assert_eq!(
            hero.title.as_str(),
            "The <b>perfect</b> starting point, for your <b>Go projects</b>"
        );
        assert_eq!(hero.call_to_action.label, "Get Started");
    }

    #[test]
    fn resolves_messages_through_translator() {
        let hero = HeroContent::compose(&site(""), &Shouting);

        assert_eq!(hero.call_to_action.label, "GET STARTED");
        assert!(hero.title.as_str().starts_with("THE <B>PERFECT</B>"));
    }
}
