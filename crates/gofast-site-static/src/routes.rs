//! Mapping between site routes, URLs and output files.
//!
//! A route is a site-relative path such as `/` or `/docs/intro`. Its URL adds
//! the locale prefix (`/gofast/` or `/gofast/fr/`), and its output file
//! depends on the `trailing_slash` setting:
//!
//! | `trailing_slash` | URL                    | File                     |
//! |------------------|------------------------|--------------------------|
//! | unset            | `/gofast/docs/intro`   | `docs/intro/index.html`  |
//! | `true`           | `/gofast/docs/intro/`  | `docs/intro/index.html`  |
//! | `false`          | `/gofast/docs/intro`   | `docs/intro.html`        |

use std::path::PathBuf;

/// Route of the homepage.
pub const HOME_ROUTE: &str = "/";

/// Route resolution for one locale.
#[derive(Debug, Clone)]
pub struct Routes {
    base_url: String,
    prefix: String,
    trailing_slash: Option<bool>,
    output_dir: PathBuf,
}

impl Routes {
    /// `base_url` serves shared files (assets, static dir); `prefix` serves
    /// the locale's pages and equals `base_url` for the default locale.
    pub fn new(
        base_url: impl Into<String>,
        prefix: impl Into<String>,
        trailing_slash: Option<bool>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: prefix.into(),
            trailing_slash,
            output_dir: output_dir.into(),
        }
    }

    /// URL of a page route. A `#fragment` on the route is kept.
    pub fn url(&self, route: &str) -> String {
        let (path, fragment) = split_fragment(route);
        let path = path.trim_matches('/');

        let url = if path.is_empty() {
            self.prefix.clone()
        } else if self.trailing_slash == Some(true) {
            format!("{}{}/", self.prefix, path)
        } else {
            format!("{}{}", self.prefix, path)
        };

        format!("{}{}", url, fragment)
    }

    /// URL of a file shared by all locales, such as `assets/main.css`.
    pub fn shared_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Output file for a page route.
    pub fn output_path(&self, route: &str) -> PathBuf {
        let path = split_fragment(route).0.trim_matches('/');

        if path.is_empty() {
            self.output_dir.join("index.html")
        } else if self.trailing_slash == Some(false) {
            self.output_dir.join(format!("{}.html", path))
        } else {
            self.output_dir.join(path).join("index.html")
        }
    }
}

/// Split `path#fragment` into the path and the fragment (with its `#`).
pub fn split_fragment(route: &str) -> (&str, &str) {
    match route.find('#') {
        Some(pos) => route.split_at(pos),
        None => (route, ""),
    }
}
