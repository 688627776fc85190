//! Asset pipeline for CSS and JavaScript processing.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Minify when asked to; CSS that fails to parse is kept as written.
    pub fn finish_css(css: String, minify: bool) -> String {
        if !minify {
            return css;
        }
        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Keeping unminified CSS: {}", e);
                css
            }
        }
    }
}

const DEFAULT_CSS: &str = r#"/* Gofast site theme */

:root {
  --color-primary: #2e8555;
  --color-primary-dark: #29784c;
  --color-background: #ffffff;
  --color-surface: #f5f6f7;
  --color-text: #1c1e21;
  --color-muted: #606770;
  --color-border: #dadde1;
  --navbar-height: 60px;
  --sidebar-width: 260px;
  --toc-width: 220px;
  --content-max-width: 860px;
  --radius: 0.4rem;
}

[data-theme="dark"] {
  --color-primary: #25c2a0;
  --color-primary-dark: #21af90;
  --color-background: #1b1b1d;
  --color-surface: #242526;
  --color-text: #e3e3e3;
  --color-muted: #a8a8a8;
  --color-border: #444950;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  background: var(--color-background);
  color: var(--color-text);
  line-height: 1.65;
}

a {
  color: var(--color-primary);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

/* Navbar */
.navbar {
  display: flex;
  justify-content: space-between;
  align-items: center;
  height: var(--navbar-height);
  padding: 0 1rem;
  background: var(--color-background);
  border-bottom: 1px solid var(--color-border);
  position: sticky;
  top: 0;
  z-index: 10;
}

.navbar__items {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  color: var(--color-text);
}

.navbar__logo {
  height: 2rem;
}

.navbar__link {
  color: var(--color-text);
  font-weight: 500;
}

.color-mode-toggle {
  background: none;
  border: none;
  color: var(--color-text);
  font-size: 1.25rem;
  cursor: pointer;
}

/* Hero */
.hero {
  padding: 4rem 2rem;
  text-align: center;
  background: var(--color-primary);
  color: #ffffff;
}

.hero__title {
  font-size: 3rem;
  margin: 0 0 1rem;
}

.hero__subtitle {
  font-size: 1.5rem;
  margin: 0 0 2rem;
}

.hero__buttons {
  display: flex;
  justify-content: center;
}

.button {
  display: inline-block;
  border-radius: var(--radius);
  font-weight: 700;
  padding: 0.5rem 1.5rem;
}

.button--secondary {
  background: #ebedf0;
  color: #1c1e21;
}

.button--lg {
  font-size: 1.2rem;
  padding: 0.75rem 2rem;
}

/* Features */
.features {
  padding: 2rem 0;
}

.features__container {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
  gap: 2rem;
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

.feature__header {
  margin-bottom: 0.5rem;
}

/* Docs */
.docs-layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - var(--navbar-height));
}

.sidebar {
  border-right: 1px solid var(--color-border);
  padding: 1rem;
  position: sticky;
  top: var(--navbar-height);
  height: calc(100vh - var(--navbar-height));
  overflow-y: auto;
}

.nav-list,
.nav-children {
  list-style: none;
  margin: 0;
  padding: 0;
}

.nav-children {
  padding-left: 1rem;
}

.nav-item a,
.nav-category {
  display: block;
  padding: 0.35rem 0.75rem;
  border-radius: var(--radius);
  color: var(--color-text);
}

.nav-category {
  font-weight: 600;
}

.nav-item.active > a {
  background: var(--color-surface);
  color: var(--color-primary);
  font-weight: 600;
}

.docs-main {
  display: grid;
  grid-template-columns: minmax(0, 1fr) var(--toc-width);
  gap: 2rem;
  padding: 2rem;
}

.content {
  max-width: var(--content-max-width);
}

.content pre {
  position: relative;
  background: var(--color-surface);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  border: 1px solid var(--color-border);
  border-radius: var(--radius);
  background: var(--color-background);
  color: var(--color-text);
  cursor: pointer;
}

.toc {
  position: sticky;
  top: calc(var(--navbar-height) + 1rem);
  align-self: start;
  font-size: 0.875rem;
}

.toc h2 {
  font-size: 0.875rem;
  text-transform: uppercase;
  color: var(--color-muted);
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 1rem;
}

/* Footer */
.footer {
  padding: 2rem 1rem;
}

.footer--dark {
  background: #303846;
  color: #ebedf0;
}

.footer--light {
  background: var(--color-surface);
  color: var(--color-text);
}

.footer__links {
  display: flex;
  flex-wrap: wrap;
  justify-content: space-around;
  gap: 2rem;
}

.footer__title {
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.footer__items {
  list-style: none;
  margin: 0;
  padding: 0;
}

.footer--dark .footer__link-item {
  color: #ebedf0;
}

.footer__copyright {
  margin-top: 2rem;
  text-align: center;
}

@media (max-width: 996px) {
  .docs-layout {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
    border-right: none;
    border-bottom: 1px solid var(--color-border);
  }

  .docs-main {
    grid-template-columns: 1fr;
  }

  .toc {
    display: none;
  }

  .hero__title {
    font-size: 2rem;
  }
}
"#;

const DEFAULT_JS: &str = r#"// Gofast site runtime
(function() {
  'use strict';

  const root = document.documentElement;
  const stored = localStorage.getItem('theme');
  const prefersDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
  root.setAttribute('data-theme', stored || (prefersDark ? 'dark' : 'light'));

  const toggle = document.querySelector('.color-mode-toggle');
  if (toggle) {
    toggle.addEventListener('click', () => {
      const next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      localStorage.setItem('theme', next);
    });
  }

  // Scroll the active sidebar entry into view
  const active = document.querySelector('.sidebar .nav-item.active');
  if (active) {
    active.scrollIntoView({ block: 'nearest' });
  }

  // Copy code button for pre blocks
  document.querySelectorAll('.content pre').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      const text = code ? code.textContent : pre.textContent;

      try {
        await navigator.clipboard.writeText(text || '');
        btn.textContent = 'Copied!';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });

    pre.appendChild(btn);
  });
})();
"#;
