//! Translator: refresh seeded doc files through DeepL.
//!
//! A target file is only rewritten when it carries a tracking marker, its body
//! still matches the recorded output hash, and the source file changed since
//! the recorded source hash.

use crate::code_blocks;
use crate::config::Config;
use crate::deepl::DeeplClient;
use crate::locale::deepl_target_lang;
use crate::marker::{hashes_match, sha256_hex, TrackingMarker};
use crate::tree::markdown_files;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do with a target file that carries a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Body changed since it was generated; leave it to its editor
    HandEdited,
    /// Already translated from the current source
    UpToDate,
    Translate,
}

/// Decide from the marker, the hash of the current target body and the hash
/// of the current source file.
///
/// Unresolved hashes never match, so a fresh placeholder is always translated.
pub fn decide(marker: &TrackingMarker, body_sha: &str, source_sha: &str) -> Decision {
    if let Some(out_sha) = &marker.out_sha256 {
        if !hashes_match(out_sha, body_sha) {
            return Decision::HandEdited;
        }
    }

    if let Some(src_sha) = &marker.src_sha256 {
        if hashes_match(src_sha, source_sha) {
            return Decision::UpToDate;
        }
    }

    Decision::Translate
}

/// Per-file result of a translator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Translated,
    /// No (or malformed) marker: not managed by this tool
    NoMarker,
    HandEdited,
    UpToDate,
}

/// What a translator run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslateReport {
    pub translated: Vec<PathBuf>,
    pub hand_edited: Vec<PathBuf>,
    pub up_to_date: usize,
    pub no_marker: usize,
    /// Source files with no counterpart in the target tree
    pub missing_target: usize,
}

impl TranslateReport {
    fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Translated => self.translated.push(path),
            FileOutcome::HandEdited => self.hand_edited.push(path),
            FileOutcome::UpToDate => self.up_to_date += 1,
            FileOutcome::NoMarker => self.no_marker += 1,
        }
    }
}

/// Translate every eligible target file for each locale in `locales`.
///
/// Locales without a docs directory are skipped. The first API error aborts
/// the run; files already written stay written.
pub async fn translate_tree(
    config: &Config,
    locales: &[&str],
    client: &DeeplClient,
) -> Result<TranslateReport> {
    let src_dir = config.source_dir();
    if !src_dir.is_dir() {
        bail!("Missing source docs folder: {}", src_dir.display());
    }

    let sources = markdown_files(&src_dir)?;
    let mut report = TranslateReport::default();

    for &lang in locales {
        if lang == config.source_lang {
            continue;
        }

        let dst_dir = config.locale_dir(lang);
        if !dst_dir.is_dir() {
            debug!("No docs folder for {}, skipping", lang);
            continue;
        }

        let target_lang = deepl_target_lang(lang);

        for rel in &sources {
            let dst = dst_dir.join(rel);
            if !dst.is_file() {
                report.missing_target += 1;
                continue;
            }

            let outcome = translate_file(
                client,
                &config.source_lang,
                &src_dir.join(rel),
                &dst,
                &target_lang,
            )
            .await?;

            if outcome == FileOutcome::Translated {
                info!("Translated {} -> {}", dst.display(), lang);
            }
            report.record(dst, outcome);
        }
    }

    Ok(report)
}

async fn translate_file(
    client: &DeeplClient,
    source_lang: &str,
    src: &Path,
    dst: &Path,
    target_lang: &str,
) -> Result<FileOutcome> {
    let current = std::fs::read_to_string(dst)
        .with_context(|| format!("Failed to read {}", dst.display()))?;

    let Some((marker, body)) = TrackingMarker::parse(&current) else {
        debug!("No tracking marker in {}, skipping", dst.display());
        return Ok(FileOutcome::NoMarker);
    };

    let source = std::fs::read_to_string(src)
        .with_context(|| format!("Failed to read {}", src.display()))?;
    let source_sha = sha256_hex(&source);

    match decide(&marker, &sha256_hex(body), &source_sha) {
        Decision::HandEdited => {
            info!(
                "Skipping {}: edited since last translation (clear the marker to retranslate)",
                dst.display()
            );
            return Ok(FileOutcome::HandEdited);
        }
        Decision::UpToDate => {
            debug!("{} is up to date", dst.display());
            return Ok(FileOutcome::UpToDate);
        }
        Decision::Translate => {}
    }

    let protected = code_blocks::protect(&source);
    let raw = client
        .translate(&protected.text, target_lang)
        .await
        .with_context(|| format!("Failed to translate {}", src.display()))?;

    for token in protected.missing_placeholders(&raw) {
        warn!(
            "Translation of {} lost placeholder {}; code block not restored",
            src.display(),
            token
        );
    }
    let translated = protected.restore(&raw);

    let doc = TrackingMarker::resolved(source_lang, source_sha, output_sha(source_lang, &translated))
        .compose(&translated);
    std::fs::write(dst, doc).with_context(|| format!("Failed to write {}", dst.display()))?;

    Ok(FileOutcome::Translated)
}

/// Hash of `body` as the marker parser will see it when the file is read back.
///
/// The parser strips whitespace after the marker, so hashing the raw body
/// would make a translation starting with whitespace look hand-edited.
fn output_sha(source_lang: &str, body: &str) -> String {
    let doc = TrackingMarker::placeholder(source_lang).compose(body);
    match TrackingMarker::parse(&doc) {
        Some((_, stored)) => sha256_hex(stored),
        None => sha256_hex(body),
    }
}
