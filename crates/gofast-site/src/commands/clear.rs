//! Remove the build output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the clear command.
pub async fn run(config: &Path) -> Result<()> {
    let site = gofast_site_config::load(config)?;
    let output_dir = &site.build.output_dir;

    if !output_dir.exists() {
        tracing::info!("Nothing to clear at {}", output_dir.display());
        return Ok(());
    }

    fs::remove_dir_all(output_dir)
        .with_context(|| format!("Failed to remove {}", output_dir.display()))?;
    tracing::info!("Removed {}", output_dir.display());

    Ok(())
}
