//! Preview stage: persist generated code for human review.
//!
//! Files live at `<dir>/<request_id>.tsx`. Writing the same request id
//! twice replaces the earlier file.

use std::path::{Path, PathBuf};

use mograph_core::types::{GeneratedArtifact, PreviewRecord};

use crate::error::PipelineError;

/// Extension of stored code files.
pub const CODE_FILE_EXTENSION: &str = "tsx";

/// Number of characters of code shown in the summary.
pub const EXCERPT_CHARS: usize = 500;

/// Writes artifacts to a directory keyed by request id.
#[derive(Debug, Clone)]
pub struct PreviewStore {
    dir: PathBuf,
}

impl PreviewStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the code file for `request_id`.
    pub fn code_path(&self, request_id: &str) -> Result<PathBuf, PipelineError> {
        validate_request_id(request_id)?;
        Ok(self
            .dir
            .join(format!("{request_id}.{CODE_FILE_EXTENSION}")))
    }

    /// Store `artifact.code` verbatim and return the review summary.
    pub async fn preview(
        &self,
        artifact: &GeneratedArtifact,
        request_id: &str,
    ) -> Result<PreviewRecord, PipelineError> {
        let code_path = self.code_path(request_id)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PipelineError::Storage {
                path: self.dir.clone(),
                source,
            })?;

        tokio::fs::write(&code_path, artifact.code.as_bytes())
            .await
            .map_err(|source| PipelineError::Storage {
                path: code_path.clone(),
                source,
            })?;

        tracing::info!(
            request_id,
            path = %code_path.display(),
            component_name = %artifact.component_name,
            "Preview stored",
        );

        let summary_message = summary_message(&code_path, artifact);
        Ok(PreviewRecord {
            request_id: request_id.to_string(),
            code_path,
            component_name: artifact.component_name.clone(),
            composition_id: artifact.composition_id.clone(),
            summary_message,
        })
    }

    /// Load previously stored code for `request_id`.
    pub async fn read_code(&self, request_id: &str) -> Result<String, PipelineError> {
        let code_path = self.code_path(request_id)?;
        tokio::fs::read_to_string(&code_path)
            .await
            .map_err(|source| PipelineError::Storage {
                path: code_path,
                source,
            })
    }
}

/// Request ids become file stems, so they must not escape the directory.
pub fn validate_request_id(request_id: &str) -> Result<(), PipelineError> {
    if request_id.trim().is_empty() {
        return Err(PipelineError::Validation(
            "Request id must not be empty".to_string(),
        ));
    }
    if request_id == "." || request_id == ".." {
        return Err(PipelineError::Validation(format!(
            "Request id '{request_id}' is not a valid file name"
        )));
    }
    if request_id.contains(['/', '\\', '\0']) {
        return Err(PipelineError::Validation(format!(
            "Request id '{request_id}' must not contain path separators"
        )));
    }
    Ok(())
}

/// First [`EXCERPT_CHARS`] characters of `code`, with `...` when cut.
pub fn code_excerpt(code: &str) -> String {
    match code.char_indices().nth(EXCERPT_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &code[..byte_idx]),
        None => code.to_string(),
    }
}

fn summary_message(code_path: &Path, artifact: &GeneratedArtifact) -> String {
    format!(
        "Motion Graphic Preview Ready!

**File**: {path}
**Component**: {component}
**Composition ID**: {composition}

**Code Preview** (first {EXCERPT_CHARS} chars):
```tsx
{excerpt}
```

**To review:**
1. Check the code above
2. Provide feedback if changes needed
3. Approve to render final video

**What would you like to do?**
- Approve and render
- Request changes (describe what to change)
",
        path = code_path.display(),
        component = artifact.component_name,
        composition = artifact.composition_id,
        excerpt = code_excerpt(&artifact.code),
    )
}
