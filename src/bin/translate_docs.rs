//! Translate seeded docs through DeepL.
//!
//! Usage:
//!   cargo run --bin translate-docs
//!
//! Required environment variables:
//! - DEEPL_API_KEY
//!
//! Optional:
//! - DEEPL_API_URL (defaults to the Free or Pro host depending on the key)
//! - DEEPL_TIMEOUT_SECS (defaults to 90)
//! - PROJECT_ROOT (defaults to the current directory)
//! - SOURCE_LANG (defaults to fr_FR)

use anyhow::Result;
use docs_i18n_sync::{
    config::{Config, DeeplConfig},
    deepl::DeeplClient,
    project::ProjectInfo,
    translator,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    docs_i18n_sync::init_tracing()?;

    let deepl_config = DeeplConfig::from_env()?;
    let config = Config::from_env();
    let info = ProjectInfo::load(&config.info_file())?;
    let locales = info.target_locales(&config.source_lang);

    let client = DeeplClient::new(&deepl_config)?;
    info!(
        "Translating docs from {} for {} locale(s) via {}",
        config.source_lang,
        locales.len(),
        client.endpoint()
    );

    let report = translator::translate_tree(&config, &locales, &client).await?;

    info!(
        "✓ Translated {}, up to date {}, hand-edited {}, unmanaged {}",
        report.translated.len(),
        report.up_to_date,
        report.hand_edited.len(),
        report.no_marker
    );
    Ok(())
}
