//! Markdown/MDX parser for docs pages.
//!
//! Extracts YAML frontmatter, builds a table of contents from headings, and
//! collects the link destinations a page refers to so the build can resolve
//! cross-document links.

pub mod frontmatter;
pub mod parser;

pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{
    markdown_options, parse_mdx, slugify, DocLink, ParseError, ParsedDoc, TocEntry,
};
