//! Pipeline configuration loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mograph_completion::client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use mograph_completion::CompletionConfig;
use mograph_renderer::client::{DEFAULT_RENDERER_URL, DEFAULT_RENDER_TIMEOUT};
use mograph_renderer::RendererConfig;

use crate::error::PipelineError;

/// Directory previews are written to when none is configured.
pub const DEFAULT_PREVIEW_DIR: &str = "./motion_graphics_previews";

/// Pipeline configuration.
///
/// Stages receive their slice of this explicitly; nothing outside
/// [`PipelineConfig::from_env`] reads the process environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub completion: CompletionConfig,
    pub renderer: RendererConfig,
    pub preview_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            renderer: RendererConfig::default(),
            preview_dir: PathBuf::from(DEFAULT_PREVIEW_DIR),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `RENDERER_URL`            | `http://localhost:3000/render` |
    /// | `RENDER_TIMEOUT_SECS`     | `180`                          |
    /// | `PREVIEW_DIR`             | `./motion_graphics_previews`   |
    /// | `COMPLETION_API_URL`      | `https://api.openai.com/v1`    |
    /// | `OPENAI_API_KEY`          | unset                          |
    /// | `COMPLETION_MODEL`        | `gpt-4o`                       |
    /// | `COMPLETION_TIMEOUT_SECS` | `120`                          |
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let render_timeout_secs: u64 = parse_or(
            get("RENDER_TIMEOUT_SECS"),
            "RENDER_TIMEOUT_SECS",
            DEFAULT_RENDER_TIMEOUT.as_secs(),
        )?;
        let completion_timeout_secs: u64 = parse_or(
            get("COMPLETION_TIMEOUT_SECS"),
            "COMPLETION_TIMEOUT_SECS",
            DEFAULT_TIMEOUT.as_secs(),
        )?;

        if render_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "RENDER_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if completion_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "COMPLETION_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            completion: CompletionConfig {
                api_url: get("COMPLETION_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
                api_key: get("OPENAI_API_KEY"),
                model: get("COMPLETION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                timeout: Duration::from_secs(completion_timeout_secs),
            },
            renderer: RendererConfig {
                url: get("RENDERER_URL").unwrap_or_else(|| DEFAULT_RENDERER_URL.into()),
                timeout: Duration::from_secs(render_timeout_secs),
            },
            preview_dir: get("PREVIEW_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PREVIEW_DIR)),
        })
    }
}

/// Parse `value` or fall back to `default` when it is absent.
fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, PipelineError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            PipelineError::Config(format!("{key} must be a valid number (got '{raw}')"))
        }),
    }
}
