//! Scaffold a new documentation site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
///
/// Files are created next to `config`. Existing files are kept unless `yes`.
pub async fn run(config: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing site...");

    let site_dir = config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let files = [
        (config.to_path_buf(), DEFAULT_CONFIG),
        (site_dir.join("docs/intro.md"), DEFAULT_INTRO),
        (site_dir.join("docs/installation.md"), DEFAULT_INSTALLATION),
        (site_dir.join("src/css/custom.css"), DEFAULT_CUSTOM_CSS),
        (site_dir.join("static/img/logo.svg"), DEFAULT_LOGO),
    ];

    for (path, content) in &files {
        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'gofast-site build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Gofast documentation site

title = "Gofast"
tagline = "Effortlessly generate the ideal application scaffold for your Go web application or API, customized to your needs and saving yourself hours of time and thinking."
favicon = "img/logo.svg"

url = "https://mahibulhaque.github.io"
base_url = "/gofast/"
trailing_slash = false

organization_name = "mahibulhaque"
project_name = "gofast"
deployment_branch = "gh-pages"

# ignore | log | warn | throw
on_broken_links = "throw"
on_broken_markdown_links = "warn"

[i18n]
default_locale = "en"
locales = ["en"]

[docs]
dir = "docs"

[build]
output = "build"
minify = true
custom_css = ["src/css/custom.css"]

[theme]
image = "img/logo.svg"

[theme.prism]
light = "github"
dark = "dracula"

[theme.navbar]
title = "Gofast"
logo = { alt = "Gofast Logo", src = "img/logo.svg" }

[[theme.navbar.items]]
type = "doc_sidebar"
label = "Docs"

[[theme.navbar.items]]
href = "https://github.com/mahibulhaque/gofast"
label = "GitHub"
position = "right"

[theme.footer]
style = "dark"
copyright = "Copyright © {year}. Built with ❤  by Mahibul Haque"

[[theme.footer.links]]
title = "Learn"
items = [
  { label = "Introduction", to = "/docs/intro" },
  { label = "Installation", to = "/docs/installation" },
]

[[theme.footer.links]]
title = "Connect with me"
items = [
  { label = "LinkedIn", href = "https://www.linkedin.com/in/mahibulhaque/" },
  { label = "X", href = "https://x.com/Mahibul45291325" },
]

[[theme.footer.links]]
title = "More"
items = [{ label = "GitHub", href = "https://github.com/mahibulhaque/gofast" }]
"#;

const DEFAULT_INTRO: &str = r#"---
sidebar_position: 1
---

# Introduction

Gofast is a CLI that scaffolds Go web applications and APIs. Pick a framework,
a database driver and the extras you need, and get a ready-to-run project.

## Next steps

Follow the [installation guide](./installation.md) to get the CLI.
"#;

const DEFAULT_INSTALLATION: &str = r#"---
sidebar_position: 2
---

# Installation

## Go install

```bash
go install github.com/mahibulhaque/gofast@latest
```

## Create a project

```bash
gofast create
```
"#;

const DEFAULT_CUSTOM_CSS: &str = r#"/* Site-wide overrides, loaded after the theme. */

:root {
  --color-primary: #00add8;
  --color-primary-dark: #0094b8;
}
"#;

const DEFAULT_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><circle cx="32" cy="32" r="30" fill="#00add8"/><text x="32" y="41" font-size="24" text-anchor="middle" fill="#fff" font-family="sans-serif">Go</text></svg>
"##;
