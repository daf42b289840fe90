//! Core domain logic for the motion-graphic generation pipeline.
//!
//! Everything in this crate is pure: request and artifact types, the
//! format-to-dimensions table, identifier derivation, code-fence
//! extraction, and the prompt templates sent to the completion service.
//! Network and filesystem access live in the `completion`, `renderer`
//! and `pipeline` crates.

pub mod config_scan;
pub mod error;
pub mod extract;
pub mod format;
pub mod naming;
pub mod outcome;
pub mod prompt;
pub mod types;

/// Frame rate shared by every composition. The render backend rejects
/// anything else, so it is not configurable.
pub const FPS: u32 = 30;
