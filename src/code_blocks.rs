//! Keeps fenced code blocks away from the translation API.
//!
//! Each ```` ``` ```` fenced block is swapped for an opaque `__CODE_BLOCK_<n>__`
//! token before the text is sent out, and swapped back afterwards.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("fence regex is valid"))
}

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(r"__CODE_BLOCK_(\d+)__").expect("token regex is valid"))
}

/// Placeholder token for the block at `index`
pub fn placeholder(index: usize) -> String {
    format!("__CODE_BLOCK_{}__", index)
}

/// Text with its code blocks replaced by placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    /// Text to send for translation
    pub text: String,
    /// Original blocks, indexed by placeholder number
    pub blocks: Vec<String>,
}

/// Replace every fenced code block in `text` with a placeholder token.
pub fn protect(text: &str) -> ProtectedText {
    let mut blocks = Vec::new();

    let protected = fence_regex().replace_all(text, |caps: &Captures| {
        blocks.push(caps[0].to_string());
        placeholder(blocks.len() - 1)
    });

    ProtectedText {
        text: protected.into_owned(),
        blocks,
    }
}

impl ProtectedText {
    /// Put the original code blocks back into `translated`.
    ///
    /// Substitution is a single pass, so a restored block is never rescanned
    /// for tokens. Tokens with no matching block are left as they are.
    pub fn restore(&self, translated: &str) -> String {
        token_regex()
            .replace_all(translated, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.blocks.get(i))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Placeholder tokens that no longer appear in `translated`
    pub fn missing_placeholders(&self, translated: &str) -> Vec<String> {
        (0..self.blocks.len())
            .map(placeholder)
            .filter(|token| !translated.contains(token.as_str()))
            .collect()
    }
}
