use std::path::PathBuf;

use mograph_completion::CompletionError;
use mograph_core::error::CoreError;
use mograph_renderer::RenderError;

/// Errors surfaced by pipeline stages.
///
/// Messages carry the underlying backend or service text unchanged so an
/// orchestrator can show them to the end user as-is.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The completion service was unreachable or returned nothing usable.
    #[error("Generation failed: {0}")]
    Generation(#[from] CompletionError),

    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Render timeout (exceeded {secs} seconds). Try a shorter video or a higher-capacity render tier."
    )]
    RenderTimeout { secs: f64 },

    #[error("Render backend error: {message}")]
    RenderBackend { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<RenderError> for PipelineError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidJob(msg) => Self::Validation(msg),
            RenderError::Storage { path, source } => Self::Storage { path, source },
            RenderError::Timeout { secs } => Self::RenderTimeout { secs },
            RenderError::Backend { status, message } => Self::RenderBackend {
                status: Some(status),
                message,
            },
            RenderError::Transport(message) => Self::RenderBackend {
                status: None,
                message,
            },
        }
    }
}
