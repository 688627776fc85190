//! MDX document parser.

use std::collections::HashSet;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,

    /// Links found in the content, in document order
    pub links: Vec<DocLink>,
}

impl ParsedDoc {
    /// Text of the first level-1 heading.
    pub fn first_heading(&self) -> Option<&str> {
        self.toc
            .iter()
            .find(|entry| entry.level == 1)
            .map(|entry| entry.title.as_str())
    }

    /// Title from frontmatter, falling back to the first heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .or_else(|| self.first_heading())
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A link destination as written in the markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    pub destination: String,
}

impl DocLink {
    /// Whether the link points at another markdown file (`./install.md#flags`).
    pub fn is_markdown_file(&self) -> bool {
        if self.destination.contains("://") || self.destination.starts_with("mailto:") {
            return false;
        }
        let path = self.path();
        path.ends_with(".md") || path.ends_with(".mdx")
    }

    /// Destination without fragment or query.
    pub fn path(&self) -> &str {
        let end = self
            .destination
            .find(['#', '?'])
            .unwrap_or(self.destination.len());
        &self.destination[..end]
    }

    /// `#fragment` part of the destination, including the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.destination
            .find('#')
            .map(|start| &self.destination[start..])
    }
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for docs pages.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse an MDX document.
///
/// Extracts frontmatter and links, and generates a table of contents.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let mut toc = Vec::new();
    let mut links = Vec::new();
    let mut used_ids = HashSet::new();
    let mut current_heading: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let explicit_id = id.map(|i| i.to_string());
                current_heading = Some((heading_level(level), explicit_id, String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit_id, title)) = current_heading.take() {
                    let id = match explicit_id {
                        Some(id) => id.trim().to_string(),
                        None => unique_id(slugify(&title), &used_ids),
                    };
                    used_ids.insert(id.clone());
                    let title = title.trim().to_string();
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                links.push(DocLink {
                    destination: dest_url.to_string(),
                });
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        toc,
        links,
    })
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// `slug`, or `slug-1`, `slug-2`... when an earlier heading already uses it.
fn unique_id(slug: String, used: &HashSet<String>) -> String {
    if !used.contains(&slug) {
        return slug;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", slug, n);
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
