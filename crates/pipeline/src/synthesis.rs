//! Code synthesis stage: instruction -> generated artifact.

use std::sync::Arc;

use mograph_completion::{CompletionRequest, CompletionService};
use mograph_core::extract::extract_code;
use mograph_core::naming::component_name_from_instruction;
use mograph_core::prompt::{build_generation_prompt, GENERATION_SYSTEM_PROMPT};
use mograph_core::types::{GeneratedArtifact, GenerationRequest};

use crate::error::PipelineError;

/// Turns a [`GenerationRequest`] into a [`GeneratedArtifact`].
#[derive(Clone)]
pub struct SynthesisStage {
    completion: Arc<dyn CompletionService>,
}

impl SynthesisStage {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Generate code for `request`.
    ///
    /// Makes exactly one completion call. The raw response and any prose
    /// around the code block are discarded.
    pub async fn synthesize(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, PipelineError> {
        request.validate()?;

        let dimensions = request.dimensions();
        let component_name = component_name_from_instruction(&request.instruction);
        let composition_id = component_name.clone();

        let prompt = build_generation_prompt(request, &composition_id, &component_name, dimensions)?;

        tracing::info!(
            component_name = %component_name,
            format = %request.format,
            duration_secs = request.duration_secs,
            assets = request.assets.len(),
            "Synthesizing motion graphic",
        );

        let completion = CompletionRequest::framed(GENERATION_SYSTEM_PROMPT, prompt);
        let raw = self.completion.complete(&completion).await?;

        let code = extract_code(&raw);
        if code.is_empty() {
            return Err(PipelineError::Generation(
                mograph_completion::CompletionError::EmptyResponse,
            ));
        }

        tracing::info!(
            component_name = %component_name,
            code_bytes = code.len(),
            "Synthesis complete",
        );

        Ok(GeneratedArtifact {
            code,
            component_name,
            composition_id,
            duration_secs: request.duration_secs,
            width: dimensions.width,
            height: dimensions.height,
        })
    }
}
