//! Structure seeder: mirror the source-locale doc tree into every target locale.
//!
//! Missing target files are created as a copy of the source file behind an
//! unresolved tracking marker. Existing files are never touched.

use crate::config::Config;
use crate::marker::TrackingMarker;
use crate::tree::markdown_files;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// What a seeding run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Files created, in creation order
    pub created: Vec<PathBuf>,
    /// Target files that already existed and were left alone
    pub existing: usize,
}

/// Create missing placeholder files for each locale in `locales`.
///
/// The source locale is skipped if it appears in the list. Fails before
/// touching anything if the source directory does not exist.
pub fn seed_structure(config: &Config, locales: &[&str]) -> Result<SeedReport> {
    let src_dir = config.source_dir();
    if !src_dir.is_dir() {
        bail!("Missing source docs folder: {}", src_dir.display());
    }

    let sources = markdown_files(&src_dir)?;
    let mut report = SeedReport::default();

    for &lang in locales {
        if lang == config.source_lang {
            continue;
        }

        let dst_dir = config.locale_dir(lang);
        std::fs::create_dir_all(&dst_dir)
            .with_context(|| format!("Failed to create {}", dst_dir.display()))?;

        for rel in &sources {
            let dst = dst_dir.join(rel);
            if let Some(parent) = dst.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            if dst.exists() {
                debug!("Keeping existing {}", dst.display());
                report.existing += 1;
                continue;
            }

            let src = src_dir.join(rel);
            let content = std::fs::read_to_string(&src)
                .with_context(|| format!("Failed to read {}", src.display()))?;
            let doc = TrackingMarker::placeholder(config.source_lang.as_str()).compose(&content);

            std::fs::write(&dst, doc)
                .with_context(|| format!("Failed to write {}", dst.display()))?;
            info!("Created {}", dst.display());
            report.created.push(dst);
        }
    }

    Ok(report)
}
