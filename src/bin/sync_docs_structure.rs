//! Seed placeholder docs for every configured locale.
//!
//! Usage:
//!   cargo run --bin sync-docs
//!
//! Optional environment variables:
//! - PROJECT_ROOT (defaults to the current directory)
//! - SOURCE_LANG (defaults to fr_FR)

use anyhow::Result;
use docs_i18n_sync::{config::Config, project::ProjectInfo, seeder};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    docs_i18n_sync::init_tracing()?;

    let config = Config::from_env();
    let info = ProjectInfo::load(&config.info_file())?;
    let locales = info.target_locales(&config.source_lang);

    info!(
        "Seeding docs from {} for {} locale(s)",
        config.source_lang,
        locales.len()
    );

    let report = seeder::seed_structure(&config, &locales)?;

    info!(
        "✓ Created {} file(s), kept {} existing",
        report.created.len(),
        report.existing
    );
    Ok(())
}
