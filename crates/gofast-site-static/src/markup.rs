//! Trusted markup fragments.
//!
//! Template values are HTML-escaped unless they are [`Html`]. Wrapping a
//! string in `Html` is the one place where markup is allowed through
//! unescaped, so every call to [`Html::trusted`] marks a trust boundary.

use std::fmt;

use serde::{Serialize, Serializer};

/// A fragment of markup that templates emit verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html(String);

impl Html {
    /// Wrap first-party markup (translation catalogs, config, rendered markdown).
    ///
    /// Never pass user-supplied input here.
    pub fn trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape plain text so it can be embedded as markup.
    pub fn escaped(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Serializes as a minijinja safe string; other serializers see a plain string.
impl Serialize for Html {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        minijinja::Value::from_safe_string(self.0.clone()).serialize(serializer)
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse the entity escapes produced by this module, minijinja and
/// pulldown-cmark, for reading attribute values back out of rendered pages.
pub fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&#x2f;", "/")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::{context, Environment};

    fn render(source: &str, value: &Html, text: &str) -> String {
        let mut env = Environment::new();
        env.add_template("t.html", source).unwrap();
        env.get_template("t.html")
            .unwrap()
            .render(context! { markup => value, text => text })
            .unwrap()
    }

    #[test]
    fn trusted_markup_is_not_escaped() {
        let html = Html::trusted("The <b>perfect</b> starting point");

        let out = render("{{ markup }}|{{ text }}", &html, "<b>plain</b>");

        assert!(out.starts_with("The <b>perfect</b> starting point|"));
        assert!(out.contains("&lt;b&gt;plain&lt;"));
    }

    #[test]
    fn escaped_text_round_trips() {
        let html = Html::escaped("/docs/intro?a=1&b=\"2\"");

        assert_eq!(html.as_str(), "/docs/intro?a=1&amp;b=&quot;2&quot;");
        assert_eq!(unescape(html.as_str()), "/docs/intro?a=1&b=\"2\"");
    }

    #[test]
    fn unescapes_minijinja_slashes() {
        assert_eq!(unescape("&#x2f;gofast&#x2f;docs"), "/gofast/docs");
        assert_eq!(unescape("plain"), "plain");
    }
}
