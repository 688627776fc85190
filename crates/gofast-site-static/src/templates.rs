//! Template engine for rendering site pages.
//!
//! Every page extends `base.html`, the layout shell holding `<head>`
//! metadata, the navbar and the footer. `primitives.html` provides the
//! `link` and `heading` macros shared by the page templates.

use minijinja::{context, Environment};
use serde::Serialize;

use gofast_site_config::{LinkTarget, NavbarPosition, NavbarTarget, SiteConfig};

use crate::components::HomePage;
use crate::markup::Html;
use crate::routes::Routes;

/// A rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub href: Html,
    pub external: bool,
}

impl LinkView {
    fn new(label: &str, target: &LinkTarget, routes: &Routes) -> Self {
        let (href, external) = match target {
            LinkTarget::Internal(route) => (routes.url(route), false),
            LinkTarget::External(url) => (url.clone(), true),
        };
        Self {
            label: label.to_string(),
            href: Html::escaped(&href),
            external,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoView {
    pub alt: String,
    pub src: Html,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavbarView {
    pub title: String,
    pub home: Html,
    pub logo: Option<LogoView>,
    pub left: Vec<LinkView>,
    pub right: Vec<LinkView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterGroupView {
    pub title: String,
    pub items: Vec<LinkView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterView {
    pub style: &'static str,
    pub groups: Vec<FooterGroupView>,
    pub copyright: Option<String>,
}

/// Parts of the layout shared by every page of one locale.
#[derive(Debug, Clone, Serialize)]
pub struct Shell {
    pub lang: String,
    pub site_title: String,
    pub favicon: Option<Html>,
    /// Absolute URL of the social card image
    pub image: Option<Html>,
    pub stylesheets: Vec<Html>,
    pub script: Html,
    pub prism_light: String,
    pub prism_dark: String,
    pub navbar: NavbarView,
    pub footer: FooterView,
}

impl Shell {
    /// Build the shell for one locale.
    ///
    /// `docs_route` is where `doc_sidebar` navbar items point; navbar items of
    /// that kind are dropped when the site has no docs.
    pub fn new(
        site: &SiteConfig,
        locale: &str,
        routes: &Routes,
        docs_route: Option<&str>,
        year: i32,
        custom_css: &[String],
    ) -> Self {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for item in &site.theme.navbar.items {
            let link = match &item.target {
                NavbarTarget::Link(target) => LinkView::new(&item.label, target, routes),
                NavbarTarget::DocSidebar => match docs_route {
                    Some(route) => LinkView::new(
                        &item.label,
                        &LinkTarget::Internal(route.to_string()),
                        routes,
                    ),
                    None => {
                        tracing::warn!("Navbar item '{}' points at an empty docs sidebar", item.label);
                        continue;
                    }
                },
            };
            match item.position {
                NavbarPosition::Left => left.push(link),
                NavbarPosition::Right => right.push(link),
            }
        }

        let footer = &site.theme.footer;
        let groups = footer
            .links
            .iter()
            .map(|group| FooterGroupView {
                title: group.title.clone(),
                items: group
                    .items
                    .iter()
                    .map(|item| LinkView::new(&item.label, &item.target, routes))
                    .collect(),
            })
            .collect();

        let mut stylesheets = vec![Html::escaped(&routes.shared_url("assets/main.css"))];
        stylesheets.extend(
            custom_css
                .iter()
                .map(|name| Html::escaped(&routes.shared_url(&format!("assets/{}", name)))),
        );

        Self {
            lang: locale.to_string(),
            site_title: site.title.clone(),
            favicon: site
                .favicon
                .as_deref()
                .map(|f| Html::escaped(&routes.shared_url(f))),
            image: site
                .theme
                .image
                .as_deref()
                .map(|i| Html::escaped(&site.absolute_url(&routes.shared_url(i)))),
            stylesheets,
            script: Html::escaped(&routes.shared_url("assets/main.js")),
            prism_light: site.theme.prism.light.clone(),
            prism_dark: site.theme.prism.dark.clone(),
            navbar: NavbarView {
                title: site.navbar_title().to_string(),
                home: Html::escaped(&routes.url("/")),
                logo: site.theme.navbar.logo.as_ref().map(|logo| LogoView {
                    alt: logo.alt.clone(),
                    src: Html::escaped(&routes.shared_url(&logo.src)),
                }),
                left,
                right,
            },
            footer: FooterView {
                style: footer.style.as_str(),
                groups,
                copyright: footer.copyright_for_year(year),
            },
        }
    }
}

/// An entry of the docs sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// Link target; `None` for category headers
    pub href: Option<Html>,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A table of contents entry.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Context for rendering a docs page.
#[derive(Debug, Clone, Serialize)]
pub struct DocContext {
    pub title: String,
    pub description: Option<String>,
    pub content: Html,
    pub sidebar: Vec<NavItem>,
    pub toc: Vec<TocEntry>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("primitives.html", PRIMITIVES_TEMPLATE),
            ("base.html", BASE_TEMPLATE),
            ("navbar.html", NAVBAR_TEMPLATE),
            ("footer.html", FOOTER_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("sidebar.html", SIDEBAR_TEMPLATE),
        ] {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render the homepage inside the layout shell.
    pub fn render_home(
        &self,
        shell: &Shell,
        page: &HomePage,
        routes: &Routes,
    ) -> Result<String, minijinja::Error> {
        let cta_href = Html::escaped(&routes.url(page.hero.call_to_action.route));

        self.env.get_template("home.html")?.render(context! {
            shell => shell,
            meta => &page.meta,
            hero => &page.hero,
            cta_href => cta_href,
            features => &page.features,
        })
    }

    /// Render a docs page inside the layout shell.
    pub fn render_doc(&self, shell: &Shell, doc: &DocContext) -> Result<String, minijinja::Error> {
        self.env.get_template("doc.html")?.render(context! {
            shell => shell,
            meta => context! { title => &doc.title, description => &doc.description },
            doc => doc,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const PRIMITIVES_TEMPLATE: &str = r##"{% macro link(href, label, class="", external=false) -%}
<a href="{{ href }}"{% if class %} class="{{ class }}"{% endif %}{% if external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ label }}</a>
{%- endmacro %}

{% macro heading(level, content, class="") -%}
<h{{ level }}{% if class %} class="{{ class }}"{% endif %}>{{ content }}</h{{ level }}>
{%- endmacro %}"##;

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ shell.lang }}" data-theme="light" data-prism-light="{{ shell.prism_light }}" data-prism-dark="{{ shell.prism_dark }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if meta.title != shell.site_title %}{{ meta.title }} | {% endif %}{{ shell.site_title }}</title>
  {% if meta.description %}<meta name="description" content="{{ meta.description }}">
  {% endif %}{% if shell.image %}<meta property="og:image" content="{{ shell.image }}">
  {% endif %}{% if shell.favicon %}<link rel="icon" href="{{ shell.favicon }}">
  {% endif %}{% for style in shell.stylesheets %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  {% include "navbar.html" %}
  <div class="main-wrapper">
    {% block content %}{% endblock %}
  </div>
  {% include "footer.html" %}
  <script src="{{ shell.script }}"></script>
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"{% from "primitives.html" import link %}<nav class="navbar">
  <div class="navbar__items">
    <a class="navbar__brand" href="{{ shell.navbar.home }}">
      {% if shell.navbar.logo %}<img class="navbar__logo" src="{{ shell.navbar.logo.src }}" alt="{{ shell.navbar.logo.alt }}">{% endif %}
      <b class="navbar__title">{{ shell.navbar.title }}</b>
    </a>
    {% for item in shell.navbar.left %}{{ link(item.href, item.label, "navbar__link", item.external) }}
    {% endfor %}
  </div>
  <div class="navbar__items navbar__items--right">
    {% for item in shell.navbar.right %}{{ link(item.href, item.label, "navbar__link", item.external) }}
    {% endfor %}
    <button class="color-mode-toggle" type="button" aria-label="Switch between dark and light mode">&#9680;</button>
  </div>
</nav>"##;

const FOOTER_TEMPLATE: &str = r##"{% from "primitives.html" import link %}<footer class="footer footer--{{ shell.footer.style }}">
  <div class="footer__links">
  {% for group in shell.footer.groups %}
    <div class="footer__col">
      <div class="footer__title">{{ group.title }}</div>
      <ul class="footer__items">
      {% for item in group.items %}
        <li class="footer__item">{{ link(item.href, item.label, "footer__link-item", item.external) }}</li>
      {% endfor %}
      </ul>
    </div>
  {% endfor %}
  </div>
  {% if shell.footer.copyright %}<div class="footer__copyright">{{ shell.footer.copyright }}</div>{% endif %}
</footer>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "primitives.html" import link, heading %}
<main>
  <div class="hero">
    <div class="hero__inner">
      {{ heading(1, hero.title, "hero__title") }}
      <p class="hero__subtitle">{{ hero.subtitle }}</p>
      <div class="hero__buttons">
        {{ link(cta_href, hero.call_to_action.label, "button button--secondary button--lg") }}
      </div>
    </div>
  </div>
  <section class="features">
    <div class="features__container">
    {% for feature in features %}
      <div class="feature" data-key="{{ feature.key }}">
        {{ heading(3, feature.title, "feature__header") }}
        <p>{{ feature.description }}</p>
      </div>
    {% endfor %}
    </div>
  </section>
</main>
{% endblock %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="docs-layout">
  <aside class="sidebar">
    {% include "sidebar.html" %}
  </aside>
  <main class="docs-main">
    <article class="doc">
      <div class="content">
        {{ doc.content }}
      </div>
    </article>
    {% if doc.toc %}
    <aside class="toc">
      <h2>On this page</h2>
      <ul>
      {% for entry in doc.toc %}
        <li class="toc-level-{{ entry.level }}">
          <a href="#{{ entry.id }}">{{ entry.title }}</a>
        </li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const SIDEBAR_TEMPLATE: &str = r##"<ul class="nav-list">
{% for item in doc.sidebar %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    {% if item.href %}<a href="{{ item.href }}">{{ item.title }}</a>{% else %}<span class="nav-category">{{ item.title }}</span>{% endif %}
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.href }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::HomePage;
    use gofast_site_config::Catalog;
    use std::path::Path;

    const SITE: &str = r#"
title = "Gofast"
tagline = "Hello world"
base_url = "/gofast/"
url = "https://mahibulhaque.github.io"
favicon = "img/favicon.ico"

[theme]
image = "img/social-card.jpg"

[theme.navbar]
logo = { alt = "Gofast Logo", src = "img/logo.svg" }

[[theme.navbar.items]]
type = "doc_sidebar"
label = "Docs"

[[theme.navbar.items]]
href = "https://github.com/mahibulhaque/gofast"
label = "GitHub"
position = "right"

[theme.footer]
copyright = "Copyright © {year}. Gofast"

[[theme.footer.links]]
title = "Learn"
items = [{ label = "Installation", to = "/docs/installation" }]

[[homepage.features]]
title = "A"
description = "alpha <strong>bold</strong>"

[[homepage.features]]
title = "B"
description = "beta"

[[homepage.features]]
title = "C"
description = "gamma"

[[homepage.features]]
title = "D"
description = "delta"
"#;

    fn site() -> SiteConfig {
        SiteConfig::from_toml_str(SITE, Path::new("."), Path::new("site.toml")).unwrap()
    }

    fn routes() -> Routes {
        Routes::new("/gofast/", "/gofast/", None, "build")
    }

    fn render_home() -> String {
        let site = site();
        let routes = routes();
        let shell = Shell::new(&site, "en", &routes, Some("/docs/intro"), 2026, &[]);
        let page = HomePage::compose(&site, &Catalog::empty("en"));

        TemplateEngine::new().render_home(&shell, &page, &routes).unwrap()
    }

    #[test]
    fn renders_homepage_inside_layout() {
        let html = render_home();

        assert!(html.contains("<title>Hello from Gofast | Gofast</title>"));
        assert!(html.contains("<html lang=\"en\""));
        assert!(html.contains("data-prism-dark=\"dracula\""));
        assert!(html.contains("href=\"/gofast/assets/main.css\""));
        assert!(html.contains("<link rel=\"icon\" href=\"/gofast/img/favicon.ico\">"));
        assert!(html.contains(
            "content=\"https://mahibulhaque.github.io/gofast/img/social-card.jpg\""
        ));
    }

    #[test]
    fn renders_hero_title_as_markup() {
        let html = render_home();

        assert!(html.contains(
            "<h1 class=\"hero__title\">The <b>perfect</b> starting point, for your <b>Go projects</b></h1>"
        ));
    }

    #[test]
    fn renders_tagline_as_subtitle() {
        let html = render_home();

        assert!(html.contains("<p class=\"hero__subtitle\">Hello world</p>"));
    }

    #[test]
    fn call_to_action_links_to_introduction() {
        let html = render_home();

        assert!(html.contains(
            "<a href=\"/gofast/docs/intro\" class=\"button button--secondary button--lg\">Get Started</a>"
        ));
    }

    #[test]
    fn renders_features_in_order() {
        let html = render_home();

        let positions: Vec<usize> = ["data-key=\"A\"", "data-key=\"B\"", "data-key=\"C\"", "data-key=\"D\""]
            .iter()
            .map(|marker| html.find(marker).expect("feature rendered"))
            .collect();

        assert_eq!(html.matches("class=\"feature\"").count(), 4);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("<p>alpha <strong>bold</strong></p>"));
    }

    #[test]
    fn renders_navbar_and_footer() {
        let html = render_home();

        assert!(html.contains("<a href=\"/gofast/docs/intro\" class=\"navbar__link\">Docs</a>"));
        assert!(html.contains("href=\"https://github.com/mahibulhaque/gofast\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("src=\"/gofast/img/logo.svg\""));
        assert!(html.contains("footer--dark"));
        assert!(html.contains("href=\"/gofast/docs/installation\""));
        assert!(html.contains("Copyright © 2026. Gofast"));
    }

    #[test]
    fn drops_doc_sidebar_item_without_docs() {
        let site = site();
        let shell = Shell::new(&site, "en", &routes(), None, 2026, &[]);

        assert!(shell.navbar.left.is_empty());
        assert_eq!(shell.navbar.right.len(), 1);
    }

    #[test]
    fn escapes_plain_text() {
        let site = SiteConfig::from_toml_str(
            "title = \"Gofast\"\ntagline = \"<script>alert(1)</script>\"",
            Path::new("."),
            Path::new("site.toml"),
        )
        .unwrap();
        let routes = routes();
        let shell = Shell::new(&site, "en", &routes, None, 2026, &[]);
        let page = HomePage::compose(&site, &Catalog::empty("en"));

        let html = TemplateEngine::new().render_home(&shell, &page, &routes).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_doc_page() {
        let site = site();
        let routes = routes();
        let shell = Shell::new(&site, "en", &routes, Some("/docs/intro"), 2026, &["custom.css".to_string()]);

        let doc = DocContext {
            title: "Installation".to_string(),
            description: Some("Install gofast".to_string()),
            content: Html::trusted("<h1 id=\"installation\">Installation</h1>"),
            sidebar: vec![NavItem {
                title: "Installation".to_string(),
                href: Some(Html::escaped("/gofast/docs/installation")),
                children: vec![],
                active: true,
            }],
            toc: vec![TocEntry {
                title: "Installation".to_string(),
                id: "installation".to_string(),
                level: 1,
            }],
        };

        let html = TemplateEngine::new().render_doc(&shell, &doc).unwrap();

        assert!(html.contains("<title>Installation | Gofast</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Install gofast\">"));
        assert!(html.contains("<h1 id=\"installation\">Installation</h1>"));
        assert!(html.contains("nav-item active"));
        assert!(html.contains("href=\"#installation\""));
        assert!(html.contains("href=\"/gofast/assets/custom.css\""));
    }
}
