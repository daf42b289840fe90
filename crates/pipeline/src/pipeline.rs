//! The stages bundled behind one handle.
//!
//! Each method runs exactly one step of the review loop; the caller (a
//! CLI, an agent, a human) decides what comes next.

use std::path::PathBuf;
use std::sync::Arc;

use mograph_completion::{CompletionService, OpenAiCompatibleClient};
use mograph_core::outcome::RenderOutcome;
use mograph_core::types::{GeneratedArtifact, GenerationRequest, PreviewRecord, RevisionDelta};
use mograph_renderer::{RenderClient, RenderJob, RendererConfig};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::preview::PreviewStore;
use crate::render::RenderStage;
use crate::revision::RevisionStage;
use crate::synthesis::SynthesisStage;

/// Synthesis, revision, preview and render over shared clients.
#[derive(Clone)]
pub struct Pipeline {
    synthesis: SynthesisStage,
    revision: RevisionStage,
    preview: PreviewStore,
    render: RenderStage,
}

impl Pipeline {
    /// Build every stage from `config`, using the HTTP completion client.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let completion = OpenAiCompatibleClient::new(config.completion.clone())
            .map_err(|e| PipelineError::Config(format!("completion client: {e}")))?;
        Self::new(
            Arc::new(completion),
            config.preview_dir.clone(),
            config.renderer.clone(),
        )
    }

    /// Build with an explicit completion service.
    pub fn new(
        completion: Arc<dyn CompletionService>,
        preview_dir: impl Into<PathBuf>,
        renderer: RendererConfig,
    ) -> Result<Self, PipelineError> {
        let client = RenderClient::new(renderer)
            .map_err(|e| PipelineError::Config(format!("render client: {e}")))?;
        Ok(Self {
            synthesis: SynthesisStage::new(completion.clone()),
            revision: RevisionStage::new(completion),
            preview: PreviewStore::new(preview_dir),
            render: RenderStage::new(client),
        })
    }

    pub fn synthesis(&self) -> &SynthesisStage {
        &self.synthesis
    }

    pub fn revision(&self) -> &RevisionStage {
        &self.revision
    }

    pub fn preview_store(&self) -> &PreviewStore {
        &self.preview
    }

    pub fn render_stage(&self) -> &RenderStage {
        &self.render
    }

    pub async fn synthesize(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, PipelineError> {
        self.synthesis.synthesize(request).await
    }

    pub async fn revise(&self, delta: RevisionDelta) -> Result<GeneratedArtifact, PipelineError> {
        self.revision.revise(delta).await
    }

    pub async fn preview(
        &self,
        artifact: &GeneratedArtifact,
        request_id: &str,
    ) -> Result<PreviewRecord, PipelineError> {
        self.preview.preview(artifact, request_id).await
    }

    pub async fn render(&self, job: &RenderJob) -> RenderOutcome {
        self.render.render(job).await
    }

    /// Synthesise then store the result under `request_id`.
    pub async fn generate_and_preview(
        &self,
        request: &GenerationRequest,
        request_id: &str,
    ) -> Result<(GeneratedArtifact, PreviewRecord), PipelineError> {
        let artifact = self.synthesize(request).await?;
        let record = self.preview(&artifact, request_id).await?;
        Ok((artifact, record))
    }

    /// Revise the code stored under `request_id` and store the revision in
    /// its place. Duration and size the revision leaves out are carried
    /// over from the stored code.
    pub async fn revise_and_preview(
        &self,
        request_id: &str,
        feedback: &str,
    ) -> Result<(GeneratedArtifact, PreviewRecord), PipelineError> {
        let original_code = self.preview.read_code(request_id).await?;
        let artifact = self
            .revise(RevisionDelta::new(original_code, feedback))
            .await?;
        let record = self.preview(&artifact, request_id).await?;
        Ok((artifact, record))
    }
}
