//! Write translation catalogs for the site's locales.

use std::path::Path;

use anyhow::{bail, Result};
use gofast_site_config::Catalog;
use gofast_site_static::MESSAGES;

/// Run the write-translations command.
///
/// Existing translations are kept; only missing messages are added.
pub async fn run(config: &Path, locale: Option<String>) -> Result<()> {
    let site = gofast_site_config::load(config)?;

    let locales = match locale {
        Some(locale) if !site.i18n.contains(&locale) => {
            bail!("Locale '{}' is not configured", locale)
        }
        Some(locale) => vec![locale],
        None => site.i18n.locales.clone(),
    };

    for locale in &locales {
        let mut catalog = Catalog::load(&site.i18n.dir, locale)?;
        let added = catalog.with_defaults(MESSAGES);
        let path = catalog.save(&site.i18n.dir)?;

        tracing::info!(
            "{} translation(s) added to {} ({} total)",
            added,
            path.display(),
            catalog.len()
        );
    }

    Ok(())
}
