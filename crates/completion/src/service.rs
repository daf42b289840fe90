//! The completion-service seam and its request/error types.

use async_trait::async_trait;
use mograph_core::error::error_chain;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Chat role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-framed chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling temperature of [`CompletionRequest::framed`].
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion length bound of [`CompletionRequest::framed`].
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// One single-completion request. The model identifier is a property of
/// the service, not of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A system framing followed by one user prompt.
    pub fn framed(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Content of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from a completion service.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {}", error_chain(.0))]
    Request(#[from] reqwest::Error),

    /// The request did not finish within the client timeout.
    #[error("Completion request timed out after {0} seconds")]
    Timeout(f64),

    /// The service returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but the completion carried no text.
    #[error("Completion service returned no content")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Anything that turns a role-framed prompt into a single text completion.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submit `request` and return the completion text.
    ///
    /// Implementations return [`CompletionError::EmptyResponse`] rather
    /// than an empty string.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
