//! Broken link detection over rendered pages.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::markup::unescape;

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s[^>]*?href="([^"]*)""#).expect("valid href regex")
});

/// A link from a generated page to a URL that nothing serves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrokenLink {
    /// URL of the page containing the link
    pub page: String,
    /// The href as written
    pub target: String,
}

/// Every URL the build serves.
#[derive(Debug, Default)]
pub struct LinkIndex {
    urls: HashSet<String>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page or file URL.
    pub fn insert(&mut self, url: &str) {
        self.urls.insert(normalize(url));
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(&normalize(url))
    }
}

/// Hrefs of every `<a>` element in `html`, unescaped.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    HREF.captures_iter(html)
        .map(|caps| unescape(&caps[1]))
        .collect()
}

/// Resolve an href found on `page` to a site URL.
///
/// Returns `None` for links the build does not own: other origins, other
/// schemes and same-page anchors.
pub fn resolve(page: &str, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || href.starts_with("//") {
        return None;
    }
    if let Some(colon) = href.find(':') {
        // `https:`, `mailto:`, `tel:`... A colon after `/`, `?` or `#` is part of the path.
        if !href[..colon].contains(['/', '?', '#']) {
            return None;
        }
    }

    if href.starts_with('/') {
        return Some(href.to_string());
    }

    let page_path = strip_suffixes(page);
    let dir = match page_path.rfind('/') {
        Some(pos) => &page_path[..=pos],
        None => "/",
    };
    Some(format!("{}{}", dir, href))
}

/// Canonical form of a site URL for lookup: no query or fragment, segments
/// percent-decoded, `.` and `..` folded, and `/index.html`, `.html` and
/// trailing `/` removed.
pub fn normalize(url: &str) -> String {
    let path = strip_suffixes(url);

    let mut segments: Vec<String> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(percent_decode_str(segment).decode_utf8_lossy().into_owned()),
        }
    }

    if let Some(last) = segments.pop() {
        if last != "index.html" {
            match last.strip_suffix(".html") {
                Some(stem) => segments.push(stem.to_string()),
                None => segments.push(last),
            }
        }
    }

    format!("/{}", segments.join("/"))
}

fn strip_suffixes(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Broken internal links of one rendered page.
pub fn check_page(page: &str, html: &str, index: &LinkIndex) -> Vec<BrokenLink> {
    extract_hrefs(html)
        .into_iter()
        .filter(|href| match resolve(page, href) {
            Some(url) => !index.contains(&url),
            None => false,
        })
        .map(|target| BrokenLink {
            page: page.to_string(),
            target,
        })
        .collect()
}

/// Human-readable report, grouped by source page.
pub fn format_report(broken: &[BrokenLink]) -> String {
    let mut by_page: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for link in broken {
        by_page.entry(&link.page).or_default().push(&link.target);
    }

    let mut report = String::new();
    for (page, targets) in by_page {
        let _ = writeln!(report, "Broken link on source page path = {}:", page);
        for target in targets {
            let _ = writeln!(report, "   -> linking to {}", target);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(urls: &[&str]) -> LinkIndex {
        let mut index = LinkIndex::new();
        for url in urls {
            index.insert(url);
        }
        index
    }

    #[test]
    fn extracts_anchor_hrefs() {
        let html = r#"<link href="/style.css"><a class="x" href="/gofast&#x2f;docs/intro">Docs</a>
<a href="https://github.com">GitHub</a><a name="top">"#;

        assert_eq!(
            extract_hrefs(html),
            vec!["/gofast/docs/intro", "https://github.com"]
        );
    }

    #[test]
    fn skips_links_outside_the_site() {
        for href in [
            "https://github.com/mahibulhaque/gofast",
            "mailto:team@example.com",
            "//cdn.example.com/x.js",
            "#flags",
            "",
        ] {
            assert_eq!(resolve("/gofast/docs/intro", href), None, "{}", href);
        }
    }

    #[test]
    fn resolves_relative_links_against_page() {
        assert_eq!(
            resolve("/gofast/docs/intro", "installation").as_deref(),
            Some("/gofast/docs/installation")
        );
        assert_eq!(
            resolve("/gofast/docs/intro/", "../installation").as_deref(),
            Some("/gofast/docs/intro/../installation")
        );
        assert_eq!(
            resolve("/gofast/docs/intro", "/gofast/").as_deref(),
            Some("/gofast/")
        );
    }

    #[test]
    fn normalizes_equivalent_urls() {
        for url in [
            "/gofast/docs/intro",
            "/gofast/docs/intro/",
            "/gofast/docs/intro.html",
            "/gofast/docs/intro/index.html",
            "/gofast/docs/intro#flags",
            "/gofast/docs/./guides/../intro?x=1",
        ] {
            assert_eq!(normalize(url), "/gofast/docs/intro", "{}", url);
        }
        assert_eq!(normalize("/gofast/"), "/gofast");
        assert_eq!(normalize("/gofast/docs/caf%C3%A9"), "/gofast/docs/café");
        assert_eq!(normalize("/gofast/img/my%20logo.svg"), "/gofast/img/my logo.svg");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn reports_only_unknown_targets() {
        let index = index(&["/gofast/", "/gofast/docs/intro", "/gofast/img/logo.svg"]);
        let html = r#"<a href="/gofast/docs/intro#x">a</a>
<a href="/gofast/docs/missing">b</a>
<a href="../img/logo.svg">c</a>
<a href="https://go.dev">d</a>"#;

        let broken = check_page("/gofast/docs/intro", html, &index);

        assert_eq!(
            broken,
            vec![BrokenLink {
                page: "/gofast/docs/intro".to_string(),
                target: "/gofast/docs/missing".to_string(),
            }]
        );
    }

    #[test]
    fn encoded_links_match_raw_routes() {
        let index = index(&["/gofast/docs/café", "/gofast/img/my logo.svg"]);
        let html = r#"<a href="/gofast/docs/caf%C3%A9">a</a><a href="../img/my%20logo.svg">b</a>"#;

        assert!(check_page("/gofast/docs/intro", html, &index).is_empty());
    }

    #[test]
    fn report_groups_by_page() {
        let broken = vec![
            BrokenLink {
                page: "/gofast/".to_string(),
                target: "/gofast/nope".to_string(),
            },
            BrokenLink {
                page: "/gofast/".to_string(),
                target: "/gofast/gone".to_string(),
            },
        ];

        assert_eq!(
            format_report(&broken),
            "Broken link on source page path = /gofast/:\n   -> linking to /gofast/nope\n   -> linking to /gofast/gone\n"
        );
    }
}
