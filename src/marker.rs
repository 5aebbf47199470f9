//! Tracking marker embedded at the top of every generated doc file.
//!
//! ```text
//! <!-- AUTO_TRANSLATED source=fr_FR src_sha256=<hex|TODO> out_sha256=<hex|TODO> -->
//!
//! body...
//! ```
//!
//! `src_sha256` is the hash of the source-locale file the body was produced
//! from; `out_sha256` is the hash of the body as written. A body whose hash no
//! longer matches `out_sha256` has been edited by hand.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;

/// Literal written in place of a hash that has not been computed yet
pub const UNRESOLVED: &str = "TODO";

static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

fn marker_regex() -> &'static Regex {
    MARKER_REGEX.get_or_init(|| {
        Regex::new(
            r"^\s*<!--\s*AUTO_TRANSLATED\s+source=(?P<src>[A-Za-z_]+)\s+src_sha256=(?P<srcsha>[0-9a-fA-F]+|TODO)\s+out_sha256=(?P<outsha>[0-9a-fA-F]+|TODO)\s*-->\s*",
        )
        .expect("marker regex is valid")
    })
}

/// Parsed tracking marker. `None` hashes are unresolved (`TODO`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingMarker {
    pub source: String,
    pub src_sha256: Option<String>,
    pub out_sha256: Option<String>,
}

impl TrackingMarker {
    /// Marker written by the seeder: nothing translated yet
    pub fn placeholder(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            src_sha256: None,
            out_sha256: None,
        }
    }

    pub fn resolved(
        source: impl Into<String>,
        src_sha256: impl Into<String>,
        out_sha256: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            src_sha256: Some(src_sha256.into()),
            out_sha256: Some(out_sha256.into()),
        }
    }

    /// Parse the marker at the start of `text`.
    ///
    /// Returns the marker and the body that follows it, with the whitespace
    /// after the marker stripped. `None` when the document does not start with
    /// a well-formed marker.
    pub fn parse(text: &str) -> Option<(Self, &str)> {
        let caps = marker_regex().captures(text)?;
        let whole = caps.get(0)?;

        let marker = Self {
            source: caps["src"].to_string(),
            src_sha256: resolved_hash(&caps["srcsha"]),
            out_sha256: resolved_hash(&caps["outsha"]),
        };

        Some((marker, &text[whole.end()..]))
    }

    /// Marker line followed by the blank separator line
    pub fn render(&self) -> String {
        format!("{}\n\n", self)
    }

    /// Full document: marker, blank line, body
    pub fn compose(&self, body: &str) -> String {
        let mut doc = self.render();
        doc.push_str(body);
        doc
    }
}

impl fmt::Display for TrackingMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<!-- AUTO_TRANSLATED source={} src_sha256={} out_sha256={} -->",
            self.source,
            self.src_sha256.as_deref().unwrap_or(UNRESOLVED),
            self.out_sha256.as_deref().unwrap_or(UNRESOLVED),
        )
    }
}

fn resolved_hash(raw: &str) -> Option<String> {
    if raw == UNRESOLVED || raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `text`
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Compare a recorded hash with a computed one, ignoring hex case
pub fn hashes_match(recorded: &str, computed: &str) -> bool {
    recorded.eq_ignore_ascii_case(computed)
}
