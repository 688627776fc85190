//! Static site builder.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Datelike;
use rayon::prelude::*;
use walkdir::WalkDir;

use gofast_site_config::{Catalog, ConfigError, SiteConfig};

use crate::assets::AssetPipeline;
use crate::components::HomePage;
use crate::docs::{discover_docs, render_markdown, Doc, DocIndex, Sidebar};
use crate::links::{check_page, format_report, BrokenLink, LinkIndex};
use crate::routes::{Routes, HOME_ROUTE};
use crate::templates::{DocContext, Shell, TemplateEngine, TocEntry};

/// Options for one build, seeded from `site.toml` and overridable by the CLI.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Locales to build; `None` builds every configured locale
    pub locales: Option<Vec<String>>,
}

impl BuildOptions {
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            output_dir: site.build.output_dir.clone(),
            minify: site.build.minify,
            locales: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, across all locales
    pub pages: usize,

    /// Locales that were built
    pub locales: Vec<String>,

    /// Broken links that were reported without failing the build
    pub broken_links: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse MDX: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Docs '{first}' and '{second}' both resolve to route {route}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },

    #[error("Locale '{0}' is not configured")]
    UnknownLocale(String),

    #[error("Found {count} broken link(s):\n{report}")]
    BrokenLinks { count: usize, report: String },

    #[error("Found {count} unresolved markdown link(s):\n{report}")]
    BrokenMarkdownLinks { count: usize, report: String },
}

/// A rendered page waiting to be written.
#[derive(Debug)]
struct Page {
    url: String,
    path: PathBuf,
    html: String,
}

/// A rendered docs page and the markdown links it could not resolve.
struct RenderedDocPage {
    page: Page,
    broken: Vec<BrokenLink>,
}

/// Everything shared by the pages of one locale.
struct LocaleBuild<'a> {
    routes: Routes,
    shell: Shell,
    sidebar: &'a Sidebar,
    doc_index: &'a DocIndex,
}

/// Static site builder.
pub struct StaticBuilder {
    site: SiteConfig,
    options: BuildOptions,
    templates: TemplateEngine,
    year: i32,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(site: SiteConfig, options: BuildOptions) -> Self {
        Self {
            site,
            options,
            templates: TemplateEngine::new(),
            year: chrono::Local::now().year(),
        }
    }

    /// Use a fixed year for `{year}` in the footer copyright.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Build the static site.
    ///
    /// Nothing is written until every page has rendered and every link check
    /// has passed.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let locales = self.selected_locales()?;

        let docs = discover_docs(&self.site.docs.dir)?;
        let sidebar = Sidebar::build(&docs);
        let doc_index = DocIndex::new(&docs);
        let custom_css = self.custom_css_files();
        let css_names: Vec<String> = custom_css.iter().map(|(name, _)| name.clone()).collect();

        tracing::info!(
            "Building {} doc(s) for locale(s): {}",
            docs.len(),
            locales.join(", ")
        );

        let mut pages = Vec::new();
        let mut markdown_links = BTreeSet::new();

        for locale in &locales {
            let catalog = Catalog::load(&self.site.i18n.dir, locale)?;
            let routes = self.routes_for(locale);
            let shell = Shell::new(
                &self.site,
                locale,
                &routes,
                sidebar.first_route(),
                self.year,
                &css_names,
            );
            let ctx = LocaleBuild {
                routes,
                shell,
                sidebar: &sidebar,
                doc_index: &doc_index,
            };

            let results: Vec<Result<RenderedDocPage, BuildError>> = docs
                .par_iter()
                .map(|doc| self.render_doc(doc, &ctx))
                .collect();

            for result in results {
                let rendered = result?;
                markdown_links.extend(rendered.broken);
                pages.push(rendered.page);
            }

            pages.push(self.render_home(&catalog, &ctx)?);
            tracing::debug!("Rendered locale {}", locale);
        }

        self.check_markdown_links(&markdown_links)?;

        let files = self.static_files();
        let broken_links = self.check_links(&pages, &files, &css_names)?;

        self.write_output(&pages, &files, &custom_css)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            locales,
            broken_links,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.options.output_dir.clone(),
        })
    }

    fn selected_locales(&self) -> Result<Vec<String>, BuildError> {
        match &self.options.locales {
            None => Ok(self.site.i18n.locales.clone()),
            Some(selected) => {
                for locale in selected {
                    if !self.site.i18n.contains(locale) {
                        return Err(BuildError::UnknownLocale(locale.clone()));
                    }
                }
                Ok(selected.clone())
            }
        }
    }

    /// Routes for a locale; non-default locales live in `<output>/<locale>/`.
    fn routes_for(&self, locale: &str) -> Routes {
        let output_dir = if self.site.i18n.is_default(locale) {
            self.options.output_dir.clone()
        } else {
            self.options.output_dir.join(locale)
        };

        Routes::new(
            self.site.base_url.clone(),
            self.site.locale_prefix(locale),
            self.site.trailing_slash,
            output_dir,
        )
    }

    fn render_doc(&self, doc: &Doc, ctx: &LocaleBuild<'_>) -> Result<RenderedDocPage, BuildError> {
        let url = ctx.routes.url(&doc.route);
        let rendered = render_markdown(doc, ctx.doc_index, &ctx.routes);

        let toc = if doc.hide_toc {
            Vec::new()
        } else {
            doc.parsed
                .toc
                .iter()
                .filter(|e| (2..=3).contains(&e.level))
                .map(|e| TocEntry {
                    title: e.title.clone(),
                    id: e.id.clone(),
                    level: e.level,
                })
                .collect()
        };

        let context = DocContext {
            title: doc.title.clone(),
            description: doc.description.clone(),
            content: rendered.html,
            sidebar: ctx.sidebar.nav_items(&ctx.routes, &doc.route),
            toc,
        };

        let html = self
            .templates
            .render_doc(&ctx.shell, &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", doc.source, e)))?;

        let broken = rendered
            .broken_links
            .into_iter()
            .map(|target| BrokenLink {
                page: doc.source.clone(),
                target,
            })
            .collect();

        Ok(RenderedDocPage {
            page: Page {
                url,
                path: ctx.routes.output_path(&doc.route),
                html,
            },
            broken,
        })
    }

    fn render_home(&self, catalog: &Catalog, ctx: &LocaleBuild<'_>) -> Result<Page, BuildError> {
        let page = HomePage::compose(&self.site, catalog);

        let html = self
            .templates
            .render_home(&ctx.shell, &page, &ctx.routes)
            .map_err(|e| BuildError::TemplateError(format!("homepage: {}", e)))?;

        Ok(Page {
            url: ctx.routes.url(HOME_ROUTE),
            path: ctx.routes.output_path(HOME_ROUTE),
            html,
        })
    }

    fn check_markdown_links(&self, broken: &BTreeSet<BrokenLink>) -> Result<(), BuildError> {
        if broken.is_empty() {
            return Ok(());
        }

        let report: String = broken
            .iter()
            .map(|link| {
                format!(
                    "Markdown link couldn't be resolved: ({}) in source file {}\n",
                    link.target, link.page
                )
            })
            .collect();

        let policy = self.site.on_broken_markdown_links;
        policy.report(&report);

        if policy.fails_build() {
            return Err(BuildError::BrokenMarkdownLinks {
                count: broken.len(),
                report,
            });
        }
        Ok(())
    }

    /// Check every `<a href>` of every page against the generated URLs.
    ///
    /// Returns the number of broken links reported without failing.
    fn check_links(
        &self,
        pages: &[Page],
        files: &[(PathBuf, String)],
        css_names: &[String],
    ) -> Result<usize, BuildError> {
        let shared = Routes::new(
            self.site.base_url.clone(),
            self.site.base_url.clone(),
            self.site.trailing_slash,
            self.options.output_dir.clone(),
        );

        let mut index = LinkIndex::new();
        for page in pages {
            index.insert(&page.url);
        }
        for (_, rel) in files {
            index.insert(&shared.shared_url(rel));
        }
        for name in ["assets/main.css", "assets/main.js", "sitemap.xml", "robots.txt"] {
            index.insert(&shared.shared_url(name));
        }
        for name in css_names {
            index.insert(&shared.shared_url(&format!("assets/{}", name)));
        }

        let broken: Vec<BrokenLink> = pages
            .par_iter()
            .flat_map(|page| check_page(&page.url, &page.html, &index))
            .collect();

        if broken.is_empty() {
            return Ok(0);
        }

        let report = format_report(&broken);
        let policy = self.site.on_broken_links;
        policy.report(&report);

        if policy.fails_build() {
            return Err(BuildError::BrokenLinks {
                count: broken.len(),
                report,
            });
        }
        Ok(broken.len())
    }

    /// Files of the static dir, as (source path, `/`-separated relative path).
    fn static_files(&self) -> Vec<(PathBuf, String)> {
        let dir = &self.site.build.static_dir;
        if !dir.exists() {
            return Vec::new();
        }

        WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e
                    .path()
                    .strip_prefix(dir)
                    .unwrap_or(e.path())
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                (e.path().to_path_buf(), rel)
            })
            .collect()
    }

    /// Configured stylesheets that exist, as (file name, source path).
    fn custom_css_files(&self) -> Vec<(String, PathBuf)> {
        self.site
            .build
            .custom_css
            .iter()
            .filter_map(|path| {
                if !path.exists() {
                    tracing::warn!("Stylesheet not found: {}", path.display());
                    return None;
                }
                let name = path.file_name()?.to_string_lossy().to_string();
                Some((name, path.clone()))
            })
            .collect()
    }

    fn write_output(
        &self,
        pages: &[Page],
        files: &[(PathBuf, String)],
        custom_css: &[(String, PathBuf)],
    ) -> Result<(), BuildError> {
        let output_dir = &self.options.output_dir;

        if output_dir.exists() {
            tracing::debug!("Clearing {}", output_dir.display());
            fs::remove_dir_all(output_dir).map_err(|e| write_error(output_dir, e))?;
        }
        fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))?;

        // Static files first so generated pages win on conflicts.
        for (source, rel) in files {
            let target = output_dir.join(rel);
            ensure_parent(&target)?;
            fs::copy(source, &target).map_err(|e| write_error(&target, e))?;
        }

        pages.par_iter().try_for_each(|page| {
            ensure_parent(&page.path)?;
            fs::write(&page.path, &page.html).map_err(|e| write_error(&page.path, e))
        })?;

        self.write_assets(custom_css)?;
        self.write_sitemap(pages)?;

        tracing::info!("Wrote {} page(s) to {}", pages.len(), output_dir.display());
        Ok(())
    }

    fn write_assets(&self, custom_css: &[(String, PathBuf)]) -> Result<(), BuildError> {
        let assets_dir = self.options.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| write_error(&assets_dir, e))?;

        let css = AssetPipeline::finish_css(AssetPipeline::generate_css(), self.options.minify);
        let path = assets_dir.join("main.css");
        fs::write(&path, css).map_err(|e| write_error(&path, e))?;

        let path = assets_dir.join("main.js");
        fs::write(&path, AssetPipeline::generate_js()).map_err(|e| write_error(&path, e))?;

        for (name, source) in custom_css {
            let content = fs::read_to_string(source).map_err(|e| {
                BuildError::ReadError(format!("Failed to read stylesheet {}: {}", source.display(), e))
            })?;
            let path = assets_dir.join(name);
            fs::write(&path, AssetPipeline::finish_css(content, self.options.minify))
                .map_err(|e| write_error(&path, e))?;
            tracing::debug!("Copied stylesheet from {}", source.display());
        }

        Ok(())
    }

    fn write_sitemap(&self, pages: &[Page]) -> Result<(), BuildError> {
        let mut urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        urls.sort_unstable();

        let entries: Vec<String> = urls
            .iter()
            .map(|url| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    crate::markup::escape(&self.site.absolute_url(url))
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>
"#,
            entries.join("\n")
        );

        let path = self.options.output_dir.join("sitemap.xml");
        fs::write(&path, sitemap).map_err(|e| write_error(&path, e))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}\n",
            self.site
                .absolute_url(&format!("{}sitemap.xml", self.site.base_url))
        );
        let path = self.options.output_dir.join("robots.txt");
        fs::write(&path, robots).map_err(|e| write_error(&path, e))?;

        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }
    Ok(())
}

fn write_error(path: &Path, e: std::io::Error) -> BuildError {
    BuildError::WriteError(format!("{}: {}", path.display(), e))
}
