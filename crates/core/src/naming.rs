//! Component and composition identifier derivation.
//!
//! Synthesis derives the name from the instruction text; revision scans the
//! returned code instead, since the model may have renamed the component.
//! Both fall back to [`FALLBACK_COMPONENT_NAME`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Identifier used when nothing usable can be derived.
pub const FALLBACK_COMPONENT_NAME: &str = "MotionGraphic";

/// Number of leading instruction words that make up a derived name.
pub const NAME_WORD_COUNT: usize = 3;

/// Matches a top-level function component declaration such as
/// `const LogoReveal: React.FC = () => {`.
pub const COMPONENT_DECL_PATTERN: &str = r"const\s+(\w+)\s*:\s*React\.FC";

static COMPONENT_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COMPONENT_DECL_PATTERN).expect("valid regex"));

/// Derive a component name from a free-text instruction.
///
/// Takes the first three alphanumeric words, capitalises each (first
/// character upper, rest lower) and concatenates them. Returns
/// `"MotionGraphic"` when the instruction has no alphanumeric words.
///
/// # Examples
///
/// ```
/// use mograph_core::naming::component_name_from_instruction;
///
/// assert_eq!(component_name_from_instruction("Logo reveal with fade in"), "LogoRevealWith");
/// assert_eq!(component_name_from_instruction("  !!  "), "MotionGraphic");
/// ```
pub fn component_name_from_instruction(instruction: &str) -> String {
    let name: String = instruction
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .take(NAME_WORD_COUNT)
        .map(capitalize)
        .collect();

    if name.is_empty() {
        FALLBACK_COMPONENT_NAME.to_string()
    } else {
        name
    }
}

/// Scan generated code for a `const <Name>: React.FC` declaration.
///
/// Best-effort heuristic over semi-structured text, not a parser. Returns
/// `"MotionGraphic"` when no declaration is found or the declared name is
/// not a valid composition id.
pub fn component_name_from_code(code: &str) -> String {
    COMPONENT_DECL_RE
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| validate_composition_id(name).is_ok())
        .map_or_else(|| FALLBACK_COMPONENT_NAME.to_string(), str::to_string)
}

/// Validate a composition id: non-empty, no underscores or hyphens.
pub fn validate_composition_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() {
        return Err(CoreError::Validation(
            "Composition id must not be empty".to_string(),
        ));
    }
    if id.contains(['_', '-']) {
        return Err(CoreError::Validation(format!(
            "Composition id '{id}' must not contain underscores or hyphens"
        )));
    }
    Ok(())
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
