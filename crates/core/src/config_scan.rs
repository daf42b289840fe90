//! Best-effort scan of the `compositionConfig` object in generated code.
//!
//! Revised code arrives without metadata, so the numbers the render call
//! needs are recovered from the exported config object. Like
//! [`crate::naming::component_name_from_code`] this is a heuristic over
//! semi-structured text: every field is optional and callers supply
//! fallbacks.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the body of `export const compositionConfig = { ... }`.
static CONFIG_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"compositionConfig\s*(?::[^=]*)?=\s*\{([^}]*)\}").expect("valid regex")
});

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bid\s*:\s*['"`]([^'"`]*)['"`]"#).expect("valid regex"));

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdurationInSeconds\s*:\s*(\d+)").expect("valid regex"));

static FPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfps\s*:\s*(\d+)").expect("valid regex"));

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwidth\s*:\s*(\d+)").expect("valid regex"));

static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bheight\s*:\s*(\d+)").expect("valid regex"));

/// Fields recovered from a `compositionConfig` literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedConfig {
    pub id: Option<String>,
    pub duration_secs: Option<u32>,
    pub fps: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ScannedConfig {
    /// Whether no config object was found at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Scan `code` for its exported composition config.
///
/// Only the first `compositionConfig = { ... }` literal is inspected, so
/// `width:` keys inside style objects elsewhere in the file are ignored.
pub fn scan_composition_config(code: &str) -> ScannedConfig {
    let Some(block) = CONFIG_BLOCK_RE
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return ScannedConfig::default();
    };

    ScannedConfig {
        id: ID_RE
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty()),
        duration_secs: capture_u32(&DURATION_RE, block),
        fps: capture_u32(&FPS_RE, block),
        width: capture_u32(&WIDTH_RE, block),
        height: capture_u32(&HEIGHT_RE, block),
    }
}

fn capture_u32(re: &Regex, haystack: &str) -> Option<u32> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
