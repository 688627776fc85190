//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gofast_site_static::{BuildOptions, StaticBuilder};

/// Run the build command.
pub async fn run(
    config: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    locale: Option<String>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let site = gofast_site_config::load(config)
        .with_context(|| format!("Invalid site configuration in {}", config.display()))?;

    let mut options = BuildOptions::from_site(&site);
    if let Some(output) = output {
        options.output_dir = output;
    }
    if let Some(minify) = minify {
        options.minify = minify;
    }
    options.locales = locale.map(|l| vec![l]);

    let result = StaticBuilder::new(site, options).build().await?;

    tracing::info!(
        "Built {} pages for {} locale(s) in {}ms",
        result.pages,
        result.locales.len(),
        result.duration_ms
    );
    if result.broken_links > 0 {
        tracing::warn!("{} broken link(s) reported", result.broken_links);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
