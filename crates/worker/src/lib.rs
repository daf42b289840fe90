//! `mograph-worker` -- command-line driver for the motion-graphic pipeline.
//!
//! Each invocation runs one step (generate, revise or render) and prints
//! its result as JSON on stdout. Logs go to stderr.
//!
//! Configuration is read from the environment (and a `.env` file) as
//! described on [`mograph_pipeline::PipelineConfig::from_env`].

pub mod cli;
pub mod commands;
