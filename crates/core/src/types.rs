//! Request and artifact types passed between pipeline stages.
//!
//! Every type here is an immutable value: stages produce new artifacts
//! rather than mutating their inputs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::format::{Dimensions, VideoFormat};
use crate::naming::{self, FALLBACK_COMPONENT_NAME};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shortest allowed composition, in seconds.
pub const MIN_DURATION_SECS: u32 = 1;

/// Longest allowed composition, in seconds.
pub const MAX_DURATION_SECS: u32 = 5;

/// Style used when the caller does not name one.
pub const DEFAULT_STYLE: &str = "modern";

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// A caller's request for a new motion graphic.
///
/// Built with [`GenerationRequest::new`] plus the `with_*` methods, then
/// checked once with [`GenerationRequest::validate`] at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// What to create, e.g. "Logo reveal with fade in".
    pub instruction: String,
    /// Length of the composition in seconds.
    pub duration_secs: u32,
    /// Output aspect format.
    pub format: VideoFormat,
    /// Named assets (logo, background image, ...) mapped to a path or URL.
    #[serde(default)]
    pub assets: BTreeMap<String, String>,
    /// Visual style hint.
    #[serde(default = "default_style")]
    pub style: String,
    /// Free-text context about the video the graphic will live in.
    #[serde(default)]
    pub video_context: String,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

impl GenerationRequest {
    /// Start a request with the default style, no assets and no context.
    pub fn new(instruction: impl Into<String>, duration_secs: u32, format: VideoFormat) -> Self {
        Self {
            instruction: instruction.into(),
            duration_secs,
            format,
            assets: BTreeMap::new(),
            style: default_style(),
            video_context: String::new(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_video_context(mut self, context: impl Into<String>) -> Self {
        self.video_context = context.into();
        self
    }

    /// Add an asset. A repeated name replaces the earlier entry.
    pub fn with_asset(mut self, name: impl Into<String>, location: impl Into<String>) -> Self {
        self.assets.insert(name.into(), location.into());
        self
    }

    /// Check duration bounds and asset entries.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_duration(self.duration_secs)?;
        for (name, location) in &self.assets {
            if name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Asset names must not be empty".to_string(),
                ));
            }
            if location.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Asset '{name}' has an empty path"
                )));
            }
        }
        Ok(())
    }

    /// Pixel dimensions implied by the request's format.
    pub fn dimensions(&self) -> Dimensions {
        self.format.dimensions()
    }
}

/// Validate that a duration lies within
/// [`MIN_DURATION_SECS`]..=[`MAX_DURATION_SECS`].
pub fn validate_duration(duration_secs: u32) -> Result<(), CoreError> {
    if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration_secs) {
        return Err(CoreError::Validation(format!(
            "Duration must be between {MIN_DURATION_SECS} and {MAX_DURATION_SECS} seconds (got {duration_secs})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GeneratedArtifact
// ---------------------------------------------------------------------------

/// Generated code plus its derived identifiers and dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// A single self-contained TSX source unit.
    pub code: String,
    pub component_name: String,
    /// Never contains underscores or hyphens.
    pub composition_id: String,
    pub duration_secs: u32,
    pub width: u32,
    pub height: u32,
}

impl GeneratedArtifact {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the identifiers fell back to the placeholder name.
    pub fn uses_fallback_name(&self) -> bool {
        self.component_name == FALLBACK_COMPONENT_NAME
    }

    /// Check the identifier invariants the render backend relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        naming::validate_composition_id(&self.composition_id)?;
        Dimensions::new(self.width, self.height)?;
        if self.code.trim().is_empty() {
            return Err(CoreError::Validation(
                "Artifact code must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PreviewRecord
// ---------------------------------------------------------------------------

/// Result of persisting an artifact for human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Caller-supplied opaque token; the file name stem.
    pub request_id: String,
    pub code_path: PathBuf,
    pub component_name: String,
    pub composition_id: String,
    /// Human-readable summary with a code excerpt and next steps.
    pub summary_message: String,
}

// ---------------------------------------------------------------------------
// RevisionDelta
// ---------------------------------------------------------------------------

/// Prior code plus the reviewer's requested change. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionDelta {
    pub original_code: String,
    pub feedback: String,
}

impl RevisionDelta {
    pub fn new(original_code: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            original_code: original_code.into(),
            feedback: feedback.into(),
        }
    }

    /// Both the code and the feedback must carry content.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.original_code.trim().is_empty() {
            return Err(CoreError::Validation(
                "Original code must not be empty".to_string(),
            ));
        }
        if self.feedback.trim().is_empty() {
            return Err(CoreError::Validation(
                "Revision feedback must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
