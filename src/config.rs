use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Source locale used when `SOURCE_LANG` is not set
pub const DEFAULT_SOURCE_LANG: &str = "fr_FR";

/// DeepL request timeout used when `DEEPL_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

const DEEPL_FREE_URL: &str = "https://api-free.deepl.com";
const DEEPL_PRO_URL: &str = "https://api.deepl.com";

/// Layout settings shared by both jobs
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `plugin_info/` and `docs/`
    pub project_root: PathBuf,
    /// Canonical, human-authored locale
    pub source_lang: String,
}

impl Config {
    pub fn new(project_root: impl Into<PathBuf>, source_lang: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            source_lang: source_lang.into(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            project_root: env_trimmed("PROJECT_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            source_lang: env_trimmed("SOURCE_LANG")
                .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string()),
        }
    }

    /// Project metadata file listing the configured locales
    pub fn info_file(&self) -> PathBuf {
        self.project_root.join("plugin_info").join("info.json")
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.project_root.join("docs")
    }

    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.docs_dir().join(locale)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.locale_dir(&self.source_lang)
    }
}

/// DeepL credentials and endpoint, only needed by the translator
#[derive(Debug, Clone)]
pub struct DeeplConfig {
    pub api_key: String,
    /// Base URL without the `/v2/translate` suffix
    pub api_url: String,
    pub timeout: Duration,
}

impl DeeplConfig {
    /// Build from a key and an optional base URL override.
    ///
    /// Without an override, keys ending in `:fx` go to the API Free host and
    /// everything else to the Pro host.
    pub fn new(api_key: impl Into<String>, api_url: Option<String>) -> Self {
        let api_key = api_key.into().trim().to_string();
        let api_url = api_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| default_api_url(&api_key).to_string());

        Self {
            api_key,
            api_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env_trimmed("DEEPL_API_KEY").context("DEEPL_API_KEY not set")?;
        let timeout_secs = env_trimmed("DEEPL_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self::new(api_key, env_trimmed("DEEPL_API_URL"))
            .with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the translate endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/v2/translate", self.api_url.trim_end_matches('/'))
    }
}

fn default_api_url(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEEPL_FREE_URL
    } else {
        DEEPL_PRO_URL
    }
}

/// Read an environment variable, treating blank values as unset
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
