//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter of a docs page.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Frontmatter {
    /// Replaces the file stem in the doc id
    pub id: Option<String>,

    /// Page title; falls back to the first heading
    pub title: Option<String>,

    /// Page description for the meta tag
    pub description: Option<String>,

    /// Custom route override, relative to the docs base path
    pub slug: Option<String>,

    /// Order in the sidebar (lower = first)
    pub sidebar_position: Option<i32>,

    /// Sidebar label, when it should differ from the title
    pub sidebar_label: Option<String>,

    /// Hide the "On this page" panel
    pub hide_table_of_contents: bool,
}

/// Extract frontmatter from MDX content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    // `---\n---` is an empty block, which serde_yaml reads as null
    let frontmatter = if yaml_content.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
