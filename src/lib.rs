//! Keep per-locale Markdown documentation in sync with a source locale.
//!
//! Two jobs share the `docs/<locale>/` layout:
//!
//! - [`seeder`] creates missing target files as marked copies of the source.
//! - [`translator`] fills and refreshes those files through DeepL, using the
//!   hashes in each file's [`marker`] to skip hand-edited or current pages.

pub mod code_blocks;
pub mod config;
pub mod deepl;
pub mod locale;
pub mod marker;
pub mod project;
pub mod seeder;
pub mod translator;
pub mod tree;

/// Initialize logging for a binary: `RUST_LOG` plus `docs_i18n_sync=info`.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docs_i18n_sync=info".parse()?),
        )
        .init();
    Ok(())
}
