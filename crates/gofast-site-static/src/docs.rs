//! Docs pages: discovery, sidebar and markdown rendering.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pulldown_cmark::{html, CowStr, Event, Parser, Tag};
use walkdir::WalkDir;

use gofast_site_mdx::{markdown_options, parse_mdx, DocLink, ParsedDoc};

use crate::builder::BuildError;
use crate::markup::Html;
use crate::routes::{split_fragment, Routes};
use crate::templates::NavItem;

/// Route prefix of every docs page.
pub const DOCS_ROUTE: &str = "/docs";

/// A docs page discovered on disk.
#[derive(Debug, Clone)]
pub struct Doc {
    /// Frontmatter id or path without extension (`guides/setup`)
    pub id: String,
    /// Source path relative to the docs dir, `/`-separated
    pub source: String,
    /// Site route (`/docs/guides/setup`)
    pub route: String,
    pub title: String,
    pub description: Option<String>,
    pub sidebar_label: Option<String>,
    pub position: Option<i32>,
    pub hide_toc: bool,
    pub parsed: ParsedDoc,
}

impl Doc {
    fn from_parsed(source: String, parsed: ParsedDoc) -> Self {
        let (dir, file) = match source.rsplit_once('/') {
            Some((dir, file)) => (dir, file),
            None => ("", source.as_str()),
        };
        let stem = file
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file)
            .to_string();

        let frontmatter = parsed.frontmatter.clone().unwrap_or_default();
        let name = frontmatter.id.clone().unwrap_or_else(|| stem.clone());
        let id = join_path(dir, &name);

        let route = match frontmatter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => docs_route(slug),
            Some(slug) => docs_route(&join_path(dir, slug)),
            None if frontmatter.id.is_none() && (stem == "index" || stem == "README") => {
                docs_route(dir)
            }
            None => docs_route(&id),
        };

        let title = parsed.title().map(str::to_string).unwrap_or(stem);

        Self {
            id,
            route,
            title,
            description: frontmatter.description,
            sidebar_label: frontmatter.sidebar_label,
            position: frontmatter.sidebar_position,
            hide_toc: frontmatter.hide_table_of_contents,
            source,
            parsed,
        }
    }

    /// Directory of the source file relative to the docs dir.
    pub fn dir(&self) -> &str {
        self.source.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    /// Label shown in the sidebar.
    pub fn label(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

fn docs_route(path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        DOCS_ROUTE.to_string()
    } else {
        format!("{}/{}", DOCS_ROUTE, path)
    }
}

/// Find and parse every markdown file under `dir`.
///
/// A missing directory yields no docs. Docs are sorted by sidebar position,
/// then id; two docs resolving to the same route are an error.
pub fn discover_docs(dir: &Path) -> Result<Vec<Doc>, BuildError> {
    if !dir.exists() {
        tracing::warn!("Docs directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut docs = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "md" && ext != "mdx" {
            continue;
        }

        let content = fs::read_to_string(path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

        let parsed = parse_mdx(&content).map_err(|e| BuildError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        tracing::debug!("Discovered doc {}", source);
        docs.push(Doc::from_parsed(source, parsed));
    }

    docs.sort_by(|a, b| {
        let position = |doc: &Doc| doc.position.unwrap_or(i32::MAX);
        position(a)
            .cmp(&position(b))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for doc in &docs {
        if let Some(first) = seen.insert(&doc.route, &doc.source) {
            return Err(BuildError::DuplicateRoute {
                route: doc.route.clone(),
                first: first.to_string(),
                second: doc.source.clone(),
            });
        }
    }

    Ok(docs)
}

/// A link in the docs sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub label: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Doc(SidebarLink),
    Category { label: String, items: Vec<SidebarLink> },
}

/// The docs sidebar, generated from the docs directory layout.
///
/// Top-level docs are listed directly; docs in a subdirectory are grouped
/// under a category named after its first path component. Items keep the
/// docs' sort order, and a category sits where its first doc would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
}

impl Sidebar {
    pub fn build(docs: &[Doc]) -> Self {
        let mut items: Vec<SidebarItem> = Vec::new();
        let mut categories: HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let link = SidebarLink {
                label: doc.label().to_string(),
                route: doc.route.clone(),
            };

            let category = doc.dir().split('/').next().unwrap_or("");
            if category.is_empty() {
                items.push(SidebarItem::Doc(link));
                continue;
            }

            match categories.get(category) {
                Some(&index) => {
                    if let SidebarItem::Category { items: links, .. } = &mut items[index] {
                        links.push(link);
                    }
                }
                None => {
                    categories.insert(category.to_string(), items.len());
                    items.push(SidebarItem::Category {
                        label: category_label(category),
                        items: vec![link],
                    });
                }
            }
        }

        Self { items }
    }

    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// Route of the first page, where `doc_sidebar` navbar items point.
    pub fn first_route(&self) -> Option<&str> {
        self.items.first().map(|item| match item {
            SidebarItem::Doc(link) => link.route.as_str(),
            SidebarItem::Category { items, .. } => items[0].route.as_str(),
        })
    }

    /// Sidebar entries for one page, with `active_route` highlighted.
    pub fn nav_items(&self, routes: &Routes, active_route: &str) -> Vec<NavItem> {
        let nav_link = |link: &SidebarLink| NavItem {
            title: link.label.clone(),
            href: Some(Html::escaped(&routes.url(&link.route))),
            children: Vec::new(),
            active: link.route == active_route,
        };

        self.items
            .iter()
            .map(|item| match item {
                SidebarItem::Doc(link) => nav_link(link),
                SidebarItem::Category { label, items } => {
                    let children: Vec<NavItem> = items.iter().map(nav_link).collect();
                    NavItem {
                        title: label.clone(),
                        href: None,
                        active: children.iter().any(|c| c.active),
                        children,
                    }
                }
            })
            .collect()
    }
}

/// `getting-started` -> `Getting started`
fn category_label(dir: &str) -> String {
    let words = dir.replace(['-', '_'], " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Rendered docs page content.
#[derive(Debug, Clone)]
pub struct RenderedDoc {
    pub html: Html,
    /// Markdown link destinations that match no doc
    pub broken_links: Vec<String>,
}

/// Maps doc source paths to routes for markdown link rewriting.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    routes: HashMap<String, String>,
}

impl DocIndex {
    pub fn new(docs: &[Doc]) -> Self {
        Self {
            routes: docs
                .iter()
                .map(|doc| (doc.source.clone(), doc.route.clone()))
                .collect(),
        }
    }

    /// Route of the doc a markdown link in `from_dir` points at.
    pub fn resolve(&self, from_dir: &str, link: &DocLink) -> Option<&str> {
        let target = link.path();
        let path = if let Some(absolute) = target.strip_prefix('/') {
            normalize_path("", absolute)?
        } else {
            normalize_path(from_dir, target)?
        };
        self.routes.get(&path).map(String::as_str)
    }
}

/// Join `target` onto `dir` and fold `.` and `..` segments.
fn normalize_path(dir: &str, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    Some(segments.join("/"))
}

/// Render a doc's markdown to HTML.
///
/// Links to other markdown files become links to their routes, and headings
/// get the ids used by the table of contents.
pub fn render_markdown(doc: &Doc, index: &DocIndex, routes: &Routes) -> RenderedDoc {
    let mut broken_links = Vec::new();
    let mut headings = doc.parsed.toc.iter();

    let parser = Parser::new_ext(&doc.parsed.content, markdown_options()).map(|event| {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = headings
                    .next()
                    .map(|entry| CowStr::from(entry.id.clone()))
                    .or(id);
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let link = DocLink {
                    destination: dest_url.to_string(),
                };

                let dest_url = if !link.is_markdown_file() {
                    dest_url
                } else if let Some(route) = index.resolve(doc.dir(), &link) {
                    let (_, fragment) = split_fragment(&link.destination);
                    CowStr::from(format!("{}{}", routes.url(route), fragment))
                } else {
                    broken_links.push(link.destination);
                    dest_url
                };

                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }

            other => other,
        }
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);

    RenderedDoc {
        // Docs are first-party content; raw HTML in markdown is passed through.
        html: Html::trusted(output),
        broken_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn doc(source: &str, content: &str) -> Doc {
        Doc::from_parsed(source.to_string(), parse_mdx(content).unwrap())
    }

    fn routes() -> Routes {
        Routes::new("/gofast/", "/gofast/", None, "build")
    }

    #[test]
    fn routes_follow_file_layout() {
        assert_eq!(doc("intro.md", "# Intro").route, "/docs/intro");
        assert_eq!(doc("guides/setup.mdx", "# Setup").route, "/docs/guides/setup");
        assert_eq!(doc("guides/index.md", "# Guides").route, "/docs/guides");
    }

    #[test]
    fn frontmatter_id_and_slug_change_route() {
        let by_id = doc("guides/first.md", "---\nid: setup\n---\n# Setup");
        assert_eq!(by_id.id, "guides/setup");
        assert_eq!(by_id.route, "/docs/guides/setup");

        let relative = doc("guides/first.md", "---\nslug: start\n---\n# Start");
        assert_eq!(relative.route, "/docs/guides/start");

        let absolute = doc("guides/first.md", "---\nslug: /intro\n---\n# Intro");
        assert_eq!(absolute.route, "/docs/intro");
    }

    #[test]
    fn title_falls_back_to_heading_then_stem() {
        assert_eq!(doc("a.md", "---\ntitle: Front\n---\n# Heading").title, "Front");
        assert_eq!(doc("a.md", "# Heading").title, "Heading");
        assert_eq!(doc("notes.md", "plain text").title, "notes");
    }

    #[test]
    fn discovers_and_sorts_docs() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        fs::create_dir_all(dir.join("guides")).unwrap();
        fs::write(dir.join("installation.md"), "---\nsidebar_position: 2\n---\n# Installation").unwrap();
        fs::write(dir.join("intro.md"), "---\nsidebar_position: 1\n---\n# Intro").unwrap();
        fs::write(dir.join("guides/zeta.md"), "# Zeta").unwrap();
        fs::write(dir.join("guides/alpha.md"), "# Alpha").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let docs = discover_docs(dir).unwrap();

        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "installation", "guides/alpha", "guides/zeta"]);
    }

    #[test]
    fn missing_docs_dir_is_empty() {
        let temp = tempdir().unwrap();
        let docs = discover_docs(&temp.path().join("docs")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn rejects_duplicate_routes() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "---\nslug: /same\n---\n# A").unwrap();
        fs::write(temp.path().join("b.md"), "---\nslug: /same\n---\n# B").unwrap();

        let err = discover_docs(temp.path()).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateRoute { ref route, .. } if route == "/docs/same"));
    }

    #[test]
    fn sidebar_groups_by_directory() {
        let docs = vec![
            doc("intro.md", "# Intro"),
            doc("getting-started/install.md", "---\nsidebar_label: Install\n---\n# Installation"),
            doc("installation.md", "# Installation"),
            doc("getting-started/usage.md", "# Usage"),
        ];

        let sidebar = Sidebar::build(&docs);

        let link = |label: &str, route: &str| SidebarLink {
            label: label.to_string(),
            route: route.to_string(),
        };
        assert_eq!(
            sidebar.items(),
            &[
                SidebarItem::Doc(link("Intro", "/docs/intro")),
                SidebarItem::Category {
                    label: "Getting started".to_string(),
                    items: vec![
                        link("Install", "/docs/getting-started/install"),
                        link("Usage", "/docs/getting-started/usage"),
                    ],
                },
                SidebarItem::Doc(link("Installation", "/docs/installation")),
            ]
        );
        assert_eq!(sidebar.first_route(), Some("/docs/intro"));
    }

    #[test]
    fn nav_items_mark_active_page() {
        let docs = vec![doc("intro.md", "# Intro"), doc("guides/setup.md", "# Setup")];
        let nav = Sidebar::build(&docs).nav_items(&routes(), "/docs/guides/setup");

        assert!(!nav[0].active);
        assert!(nav[1].active);
        assert!(nav[1].href.is_none());
        assert!(nav[1].children[0].active);
        assert_eq!(
            nav[1].children[0].href.as_ref().map(Html::as_str),
            Some("/gofast/docs/guides/setup")
        );
    }

    #[test]
    fn rewrites_markdown_links_to_routes() {
        let docs = vec![
            doc("intro.md", "# Intro\n\nSee [install](./guides/install.md#go-install)."),
            doc("guides/install.md", "# Install\n\nBack to [intro](../intro.md)."),
        ];
        let index = DocIndex::new(&docs);

        let intro = render_markdown(&docs[0], &index, &routes());
        assert!(intro
            .html
            .as_str()
            .contains("<a href=\"/gofast/docs/guides/install#go-install\">install</a>"));
        assert!(intro.broken_links.is_empty());

        let install = render_markdown(&docs[1], &index, &routes());
        assert!(install.html.as_str().contains("href=\"/gofast/docs/intro\""));
    }

    #[test]
    fn collects_broken_markdown_links() {
        let docs = vec![doc(
            "intro.md",
            "# Intro\n\n[gone](./missing.md) and [site](https://go.dev) and [up](../../x.md)",
        )];
        let rendered = render_markdown(&docs[0], &DocIndex::new(&docs), &routes());

        assert_eq!(rendered.broken_links, vec!["./missing.md", "../../x.md"]);
        assert!(rendered.html.as_str().contains("href=\"https://go.dev\""));
    }

    #[test]
    fn headings_get_toc_ids() {
        let docs = vec![doc("intro.md", "# Getting Started\n\n## Flags {#cli-flags}")];
        let rendered = render_markdown(&docs[0], &DocIndex::new(&docs), &routes());

        assert!(rendered.html.as_str().contains("<h1 id=\"getting-started\">Getting Started</h1>"));
        assert!(rendered.html.as_str().contains("<h2 id=\"cli-flags\">Flags</h2>"));
    }

    #[test]
    fn repeated_headings_render_distinct_ids() {
        let docs = vec![doc("intro.md", "## Usage\n\nOne.\n\n## Usage\n\nTwo.\n")];
        let rendered = render_markdown(&docs[0], &DocIndex::new(&docs), &routes());

        assert!(rendered.html.as_str().contains("<h2 id=\"usage\">Usage</h2>"));
        assert!(rendered.html.as_str().contains("<h2 id=\"usage-1\">Usage</h2>"));
    }
}
