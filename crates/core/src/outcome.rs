//! Uniform result shape of a render attempt.

use serde::{Deserialize, Serialize};

/// Why a render failed. Lets a caller decide whether to retry, shorten the
/// request, or abandon it without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFailureKind {
    /// The job was rejected before anything was sent.
    Validation,
    /// The code file could not be read.
    Storage,
    /// The render exceeded the client-side deadline.
    Timeout,
    /// The backend answered with an error status or an unusable body.
    Backend,
    /// DNS, connection refused, TLS and other transport faults.
    Transport,
}

/// Outcome of a render: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Success {
        /// Backend-side location of the video, when the backend reports one.
        video_path: Option<String>,
        filename: String,
        render_time_seconds: f64,
        file_size_mb: f64,
        message: String,
    },
    #[serde(rename = "failed")]
    Failure {
        kind: RenderFailureKind,
        /// Backend or transport error text, preserved verbatim.
        error: String,
    },
}

impl RenderOutcome {
    pub fn failure(kind: RenderFailureKind, error: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
