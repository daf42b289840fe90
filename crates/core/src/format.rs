//! Aspect formats and the fixed format-to-dimensions lookup table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Format label: landscape.
pub const FORMAT_LANDSCAPE: &str = "16:9";

/// Format label: portrait (vertical video, the default).
pub const FORMAT_PORTRAIT: &str = "9:16";

/// Format label: square.
pub const FORMAT_SQUARE: &str = "1:1";

/// All recognised format labels.
pub const ALL_FORMAT_LABELS: &[&str] = &[FORMAT_LANDSCAPE, FORMAT_PORTRAIT, FORMAT_SQUARE];

/* --------------------------------------------------------------------------
VideoFormat
-------------------------------------------------------------------------- */

/// Output aspect format of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VideoFormat {
    /// 16:9, 1920x1080.
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16, 1080x1920.
    #[default]
    #[serde(rename = "9:16")]
    Portrait,
    /// 1:1, 1080x1080.
    #[serde(rename = "1:1")]
    Square,
}

impl VideoFormat {
    /// Parse a format label, falling back to [`VideoFormat::Portrait`] for
    /// anything unrecognised.
    pub fn parse_lenient(label: &str) -> Self {
        Self::parse_strict(label).unwrap_or_default()
    }

    /// Parse a format label, rejecting anything outside
    /// [`ALL_FORMAT_LABELS`].
    pub fn parse_strict(label: &str) -> Result<Self, CoreError> {
        match label.trim() {
            FORMAT_LANDSCAPE => Ok(Self::Landscape),
            FORMAT_PORTRAIT => Ok(Self::Portrait),
            FORMAT_SQUARE => Ok(Self::Square),
            other => Err(CoreError::Validation(format!(
                "Unknown video format '{other}'. Must be one of: {}",
                ALL_FORMAT_LABELS.join(", ")
            ))),
        }
    }

    /// The `W:H` label used in prompts and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => FORMAT_LANDSCAPE,
            Self::Portrait => FORMAT_PORTRAIT,
            Self::Square => FORMAT_SQUARE,
        }
    }

    /// Pixel dimensions for this format.
    pub fn dimensions(self) -> Dimensions {
        match self {
            Self::Landscape => Dimensions {
                width: 1920,
                height: 1080,
            },
            Self::Portrait => Dimensions {
                width: 1080,
                height: 1920,
            },
            Self::Square => Dimensions {
                width: 1080,
                height: 1080,
            },
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/* --------------------------------------------------------------------------
Dimensions
-------------------------------------------------------------------------- */

/// Width and height of a composition in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Construct dimensions, rejecting zero on either axis.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::Validation(format!(
                "Width and height must be greater than 0 (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Look up dimensions for a format label. Unknown labels map to 1080x1920.
pub fn dimensions_for(label: &str) -> Dimensions {
    VideoFormat::parse_lenient(label).dimensions()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
