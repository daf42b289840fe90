//! Extraction of a single code block from a raw completion response.
//!
//! Preference order:
//! 1. the first fence tagged `tsx`
//! 2. the first fence tagged `typescript`
//! 3. the first fence of any kind (its info string, if any, is dropped)
//! 4. the whole response, trimmed

/// Fence marker.
const FENCE: &str = "```";

/// Fence tags tried in order before falling back to an untagged fence.
pub const PREFERRED_FENCE_TAGS: &[&str] = &["tsx", "typescript"];

/// Extract the code from a completion response.
///
/// Idempotent on already-clean input: text without fence markers is only
/// trimmed.
///
/// # Examples
///
/// ```
/// use mograph_core::extract::extract_code;
///
/// let raw = "Here you go:\n```tsx\nconst x = 1;\n```\nEnjoy!";
/// assert_eq!(extract_code(raw), "const x = 1;");
/// assert_eq!(extract_code("const x = 1;"), "const x = 1;");
/// ```
pub fn extract_code(text: &str) -> String {
    for tag in PREFERRED_FENCE_TAGS {
        let opener = format!("{FENCE}{tag}");
        if let Some(body) = fenced_body_after(text, &opener) {
            return body.trim().to_string();
        }
    }

    if let Some(body) = fenced_body_after(text, FENCE) {
        return strip_info_string(body).trim().to_string();
    }

    text.trim().to_string()
}

/// Return the text between the first occurrence of `opener` and the next
/// fence marker (or the end of the text if the fence is never closed).
fn fenced_body_after<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let rest = &text[start..];
    Some(rest.find(FENCE).map_or(rest, |end| &rest[..end]))
}

/// Drop a language tag such as `jsx` from the first line of a fence body.
///
/// Only a single bare word followed by a newline counts as a tag, so code
/// that starts on the fence line is kept intact.
fn strip_info_string(body: &str) -> &str {
    match body.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty()
                && first
                    .trim()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '.')) =>
        {
            rest
        }
        _ => body,
    }
}
