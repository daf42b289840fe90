//! Completion-service client library.
//!
//! Defines the [`CompletionService`] seam the pipeline depends on and an
//! OpenAI-compatible HTTP implementation of it. The pipeline only assumes
//! "submit prompt, get text back, may fail or time out".

pub mod client;
pub mod service;

pub use client::{CompletionConfig, OpenAiCompatibleClient};
pub use service::{
    ChatMessage, CompletionError, CompletionRequest, CompletionService, Role, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
