//! Remote render backend client.
//!
//! Submits finished composition code to the render service over HTTP,
//! bounds the call with a hard client-side timeout, and normalises every
//! result into a [`RenderOutcome`](mograph_core::outcome::RenderOutcome).
//! No retries happen here: render jobs cost money and backend job slots,
//! so retry policy belongs to the caller.

pub mod client;
pub mod job;
pub mod response;

pub use client::{RenderClient, RenderError, RendererConfig};
pub use job::RenderJob;
