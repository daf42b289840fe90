//! Render job description and the JSON payload sent to the backend.

use std::path::PathBuf;

use serde::Serialize;

use mograph_core::error::CoreError;
use mograph_core::format::Dimensions;
use mograph_core::naming::validate_composition_id;
use mograph_core::FPS;

/// Duration used when the caller does not give one.
pub const DEFAULT_RENDER_DURATION_SECS: u32 = 5;

/// Width used when the caller does not give one.
pub const DEFAULT_RENDER_WIDTH: u32 = 1080;

/// Height used when the caller does not give one.
pub const DEFAULT_RENDER_HEIGHT: u32 = 1920;

/// Everything needed to render one stored composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Location of the previewed code file.
    pub code_path: PathBuf,
    pub composition_id: String,
    /// Output file stem; `.mp4` is appended for the default filename.
    pub output_name: String,
    pub duration_secs: u32,
    pub width: u32,
    pub height: u32,
}

impl RenderJob {
    /// A 5 second 1080x1920 job.
    pub fn new(
        code_path: impl Into<PathBuf>,
        composition_id: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            code_path: code_path.into(),
            composition_id: composition_id.into(),
            output_name: output_name.into(),
            duration_secs: DEFAULT_RENDER_DURATION_SECS,
            width: DEFAULT_RENDER_WIDTH,
            height: DEFAULT_RENDER_HEIGHT,
        }
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.width = dimensions.width;
        self.height = dimensions.height;
        self
    }

    /// Filename reported when the backend does not name the output.
    pub fn default_filename(&self) -> String {
        format!("{}.mp4", self.output_name)
    }

    /// Reject jobs the backend would refuse anyway.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_composition_id(&self.composition_id)?;
        Dimensions::new(self.width, self.height)?;
        if self.duration_secs == 0 {
            return Err(CoreError::Validation(
                "Render duration must be greater than 0".to_string(),
            ));
        }
        if self.output_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Output name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the request payload around already-loaded `code`.
    pub fn payload<'a>(&'a self, code: &'a str) -> RenderPayload<'a> {
        RenderPayload {
            code,
            composition_id: &self.composition_id,
            duration: self.duration_secs,
            width: self.width,
            height: self.height,
            fps: FPS,
        }
    }
}

/// JSON body of `POST <renderer-url>`.
#[derive(Debug, Serialize)]
pub struct RenderPayload<'a> {
    pub code: &'a str,
    pub composition_id: &'a str,
    pub duration: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_uses_defaults() {
        let job = RenderJob::new("/tmp/a.tsx", "Intro", "intro_final");
        assert_eq!(job.duration_secs, 5);
        assert_eq!((job.width, job.height), (1080, 1920));
        assert_eq!(job.default_filename(), "intro_final.mp4");
        assert!(job.validate().is_ok());
    }

    #[test]
    fn payload_always_carries_30_fps() {
        let job = RenderJob::new("/tmp/a.tsx", "Intro", "out")
            .with_duration(3)
            .with_dimensions(Dimensions {
                width: 1920,
                height: 1080,
            });
        let json = serde_json::to_value(job.payload("code here")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "code here",
                "composition_id": "Intro",
                "duration": 3,
                "width": 1920,
                "height": 1080,
                "fps": 30,
            })
        );
    }

    #[test]
    fn hyphenated_composition_id_rejected() {
        let job = RenderJob::new("/tmp/a.tsx", "my-intro", "out");
        assert!(job.validate().is_err());
    }

    #[test]
    fn zero_duration_rejected() {
        let job = RenderJob::new("/tmp/a.tsx", "Intro", "out").with_duration(0);
        assert!(job.validate().is_err());
    }

    #[test]
    fn blank_output_name_rejected() {
        let job = RenderJob::new("/tmp/a.tsx", "Intro", "  ");
        assert!(job.validate().is_err());
    }
}
