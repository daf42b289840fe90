//! Revision stage: prior code + reviewer feedback -> revised artifact.
//!
//! Unlike synthesis, the component name is scanned from the *returned*
//! code, since the model may not have kept the original identifier.

use std::sync::Arc;

use mograph_completion::{CompletionError, CompletionRequest, CompletionService};
use mograph_core::config_scan::scan_composition_config;
use mograph_core::extract::extract_code;
use mograph_core::naming::component_name_from_code;
use mograph_core::prompt::{build_revision_prompt, REVISION_SYSTEM_PROMPT};
use mograph_core::types::{GeneratedArtifact, RevisionDelta};
use mograph_renderer::job::{
    DEFAULT_RENDER_DURATION_SECS, DEFAULT_RENDER_HEIGHT, DEFAULT_RENDER_WIDTH,
};

use crate::error::PipelineError;

/// Duration and dimensions to assume when the revised code does not state
/// them in its `compositionConfig`. Taken from the code being revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionFallback {
    pub duration_secs: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for RevisionFallback {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_RENDER_DURATION_SECS,
            width: DEFAULT_RENDER_WIDTH,
            height: DEFAULT_RENDER_HEIGHT,
        }
    }
}

impl From<&GeneratedArtifact> for RevisionFallback {
    fn from(artifact: &GeneratedArtifact) -> Self {
        Self {
            duration_secs: artifact.duration_secs,
            width: artifact.width,
            height: artifact.height,
        }
    }
}

impl RevisionFallback {
    /// Numbers stated by `code`'s config object, field by field, else the
    /// render defaults.
    pub fn from_code(code: &str) -> Self {
        let scanned = scan_composition_config(code);
        let defaults = Self::default();
        Self {
            duration_secs: scanned
                .duration_secs
                .filter(|d| *d > 0)
                .unwrap_or(defaults.duration_secs),
            width: scanned.width.filter(|w| *w > 0).unwrap_or(defaults.width),
            height: scanned.height.filter(|h| *h > 0).unwrap_or(defaults.height),
        }
    }
}

/// Re-synthesises code from a [`RevisionDelta`].
#[derive(Clone)]
pub struct RevisionStage {
    completion: Arc<dyn CompletionService>,
}

impl RevisionStage {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Revise raw code. Duration and dimensions come from the revised
    /// code's config object, else from the original code's
    /// ([`RevisionFallback::from_code`]).
    pub async fn revise(&self, delta: RevisionDelta) -> Result<GeneratedArtifact, PipelineError> {
        let fallback = RevisionFallback::from_code(&delta.original_code);
        self.revise_with_fallback(delta, fallback).await
    }

    /// Revise a previously generated artifact, falling back to its
    /// duration and dimensions.
    pub async fn revise_artifact(
        &self,
        original: &GeneratedArtifact,
        feedback: &str,
    ) -> Result<GeneratedArtifact, PipelineError> {
        let delta = RevisionDelta::new(original.code.clone(), feedback);
        self.revise_with_fallback(delta, RevisionFallback::from(original))
            .await
    }

    async fn revise_with_fallback(
        &self,
        delta: RevisionDelta,
        fallback: RevisionFallback,
    ) -> Result<GeneratedArtifact, PipelineError> {
        delta.validate()?;

        tracing::info!(
            original_bytes = delta.original_code.len(),
            feedback = %delta.feedback,
            "Revising motion graphic",
        );

        let prompt = build_revision_prompt(&delta.original_code, &delta.feedback);
        let completion = CompletionRequest::framed(REVISION_SYSTEM_PROMPT, prompt);
        let raw = self.completion.complete(&completion).await?;

        let code = extract_code(&raw);
        if code.is_empty() {
            return Err(PipelineError::Generation(CompletionError::EmptyResponse));
        }

        let component_name = component_name_from_code(&code);
        let scanned = scan_composition_config(&code);

        tracing::info!(
            component_name = %component_name,
            code_bytes = code.len(),
            config_found = !scanned.is_empty(),
            "Revision complete",
        );

        Ok(GeneratedArtifact {
            composition_id: component_name.clone(),
            component_name,
            duration_secs: scanned
                .duration_secs
                .filter(|d| *d > 0)
                .unwrap_or(fallback.duration_secs),
            width: scanned.width.filter(|w| *w > 0).unwrap_or(fallback.width),
            height: scanned.height.filter(|h| *h > 0).unwrap_or(fallback.height),
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fallback_matches_render_defaults() {
        let fallback = RevisionFallback::default();
        assert_eq!(fallback.duration_secs, 5);
        assert_eq!((fallback.width, fallback.height), (1080, 1920));
    }

    #[test]
    fn fallback_from_code_reads_config() {
        let code = "export const compositionConfig = {\n  id: 'Wide',\n  durationInSeconds: 2,\n  fps: 30,\n  width: 1920,\n  height: 1080,\n};";
        assert_eq!(
            RevisionFallback::from_code(code),
            RevisionFallback {
                duration_secs: 2,
                width: 1920,
                height: 1080,
            }
        );
    }

    #[test]
    fn fallback_from_code_fills_missing_fields_with_defaults() {
        let code = "export const compositionConfig = { id: 'Short', durationInSeconds: 1 };";
        assert_eq!(
            RevisionFallback::from_code(code),
            RevisionFallback {
                duration_secs: 1,
                width: 1080,
                height: 1920,
            }
        );
        assert_eq!(
            RevisionFallback::from_code("const Bare = () => null;"),
            RevisionFallback::default()
        );
    }

    #[test]
    fn fallback_from_artifact_copies_numbers() {
        let artifact = GeneratedArtifact {
            code: "x".to_string(),
            component_name: "A".to_string(),
            composition_id: "A".to_string(),
            duration_secs: 2,
            width: 1920,
            height: 1080,
        };
        assert_eq!(
            RevisionFallback::from(&artifact),
            RevisionFallback {
                duration_secs: 2,
                width: 1920,
                height: 1080,
            }
        );
    }
}
