use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// The part of `plugin_info/info.json` this tool cares about.
///
/// Everything else in the metadata document is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Configured locales, source locale included
    #[serde(default)]
    pub language: Vec<String>,
}

impl ProjectInfo {
    /// Read and parse the metadata file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project metadata {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse project metadata {}", path.display()))
    }

    /// Configured locales other than `source`, in declaration order
    pub fn target_locales(&self, source: &str) -> Vec<&str> {
        self.language
            .iter()
            .map(String::as_str)
            .filter(|lang| *lang != source)
            .collect()
    }
}
