//! The motion-graphic generation pipeline.
//!
//! Stages, leaf-first:
//!
//! - [`synthesis`]: instruction -> generated code via the completion service
//! - [`revision`]: prior code + feedback -> revised code
//! - [`preview`]: persist code under a request id and summarise it
//! - [`render`]: submit stored code to the render backend
//!
//! Each stage is independently invocable and keeps no state between calls
//! apart from the preview file it writes, which lets an outer orchestrator
//! put human approval between any two steps. [`Pipeline`] bundles the
//! stages behind one configuration.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod revision;
pub mod synthesis;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::Pipeline;
