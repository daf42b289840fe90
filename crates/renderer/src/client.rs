//! HTTP client for the render backend.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use mograph_core::error::error_chain;
use mograph_core::outcome::{RenderFailureKind, RenderOutcome};

use crate::job::RenderJob;
use crate::response::{backend_error_message, parse_success_body};

/// Default render endpoint for a locally running backend.
pub const DEFAULT_RENDERER_URL: &str = "http://localhost:3000/render";

/// Hard client-side deadline for one render, kept below the backend's own
/// limit so a hung backend cannot stall the caller indefinitely.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(180);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Where and how long to render.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Full URL of the render endpoint (the request is POSTed here as-is).
    pub url: String,
    pub timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RENDERER_URL.to_string(),
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Reasons a render attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The job failed validation before anything was sent.
    #[error("Invalid render job: {0}")]
    InvalidJob(String),

    /// The code file could not be read.
    #[error("Failed to read code file {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend did not answer within the client deadline.
    #[error(
        "Render timeout (exceeded {secs} seconds). Try a shorter video or a higher-capacity render tier."
    )]
    Timeout { secs: f64 },

    /// Non-200 status or an unusable 200 body; `message` is the backend's
    /// own text.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// DNS, connection refused, TLS and similar faults.
    #[error("Render error: {0}")]
    Transport(String),
}

impl RenderError {
    pub fn kind(&self) -> RenderFailureKind {
        match self {
            Self::InvalidJob(_) => RenderFailureKind::Validation,
            Self::Storage { .. } => RenderFailureKind::Storage,
            Self::Timeout { .. } => RenderFailureKind::Timeout,
            Self::Backend { .. } => RenderFailureKind::Backend,
            Self::Transport(_) => RenderFailureKind::Transport,
        }
    }
}

impl From<RenderError> for RenderOutcome {
    fn from(err: RenderError) -> Self {
        RenderOutcome::failure(err.kind(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for a single render backend endpoint.
#[derive(Debug, Clone)]
pub struct RenderClient {
    client: reqwest::Client,
    config: RendererConfig,
}

impl RenderClient {
    /// Build a client whose requests are bounded by `config.timeout`.
    pub fn new(config: RendererConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render `job`, folding every failure into [`RenderOutcome::Failure`].
    pub async fn render(&self, job: &RenderJob) -> RenderOutcome {
        match self.try_render(job).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    composition_id = %job.composition_id,
                    kind = ?err.kind(),
                    error = %err,
                    "Render failed",
                );
                err.into()
            }
        }
    }

    /// Render `job`, returning the typed error on failure.
    ///
    /// The returned outcome is always [`RenderOutcome::Success`].
    pub async fn try_render(&self, job: &RenderJob) -> Result<RenderOutcome, RenderError> {
        job.validate()
            .map_err(|e| RenderError::InvalidJob(e.to_string()))?;

        let code = tokio::fs::read_to_string(&job.code_path)
            .await
            .map_err(|source| RenderError::Storage {
                path: job.code_path.clone(),
                source,
            })?;

        tracing::info!(
            url = %self.config.url,
            composition_id = %job.composition_id,
            duration_secs = job.duration_secs,
            width = job.width,
            height = job.height,
            code_bytes = code.len(),
            "Sending render request",
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&self.config.url)
            .json(&job.payload(&code))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Render backend responded",
        );

        if status != reqwest::StatusCode::OK {
            return Err(RenderError::Backend {
                status: status.as_u16(),
                message: backend_error_message(status.as_u16(), &body),
            });
        }

        let parsed = parse_success_body(&body).map_err(|e| RenderError::Backend {
            status: status.as_u16(),
            message: format!("Invalid render response: {e}"),
        })?;

        Ok(parsed.into_outcome(job.default_filename()))
    }

    /// Map a reqwest failure, singling out the client deadline.
    fn map_transport(&self, err: reqwest::Error) -> RenderError {
        if err.is_timeout() {
            RenderError::Timeout {
                secs: self.config.timeout.as_secs_f64(),
            }
        } else {
            RenderError::Transport(error_chain(&err))
        }
    }
}
