//! Render stage: hand a previewed composition to the remote renderer.

use mograph_core::outcome::RenderOutcome;
use mograph_core::types::{GeneratedArtifact, PreviewRecord};
use mograph_renderer::{RenderClient, RenderJob};

use crate::error::PipelineError;

/// Thin wrapper over [`RenderClient`] that speaks [`PipelineError`].
#[derive(Debug, Clone)]
pub struct RenderStage {
    client: RenderClient,
}

impl RenderStage {
    pub fn new(client: RenderClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RenderClient {
        &self.client
    }

    /// Render `job`. Every failure is folded into [`RenderOutcome::Failure`].
    pub async fn render(&self, job: &RenderJob) -> RenderOutcome {
        self.client.render(job).await
    }

    /// Render `job`, surfacing failures as errors instead.
    pub async fn try_render(&self, job: &RenderJob) -> Result<RenderOutcome, PipelineError> {
        Ok(self.client.try_render(job).await?)
    }
}

/// Job for a stored preview, using the artifact's own duration and size.
pub fn job_for_preview(
    record: &PreviewRecord,
    artifact: &GeneratedArtifact,
    output_name: impl Into<String>,
) -> RenderJob {
    RenderJob::new(
        record.code_path.clone(),
        record.composition_id.clone(),
        output_name,
    )
    .with_duration(artifact.duration_secs)
    .with_dimensions(artifact.dimensions())
}
