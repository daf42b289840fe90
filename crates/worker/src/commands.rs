//! Subcommand handlers. Each returns a JSON report for stdout.

use anyhow::Context as _;
use serde::Serialize;
use serde_json::Value;

use mograph_core::config_scan::scan_composition_config;
use mograph_core::naming::component_name_from_code;
use mograph_core::types::{GeneratedArtifact, GenerationRequest, PreviewRecord};
use mograph_pipeline::preview::PreviewStore;
use mograph_pipeline::{Pipeline, PipelineConfig};
use mograph_renderer::RenderJob;

use crate::cli::{Cli, Command, GenerateArgs, RenderArgs, ReviseArgs};

/// What a subcommand prints, and whether the process should exit cleanly.
#[derive(Debug)]
pub struct Report {
    pub body: Value,
    pub success: bool,
}

impl Report {
    fn ok(body: impl Serialize) -> anyhow::Result<Self> {
        Ok(Self {
            body: serde_json::to_value(body)?,
            success: true,
        })
    }
}

/// Generated or revised code as stored for review.
#[derive(Debug, Serialize)]
struct PreviewReport {
    request_id: String,
    code_path: String,
    component_name: String,
    composition_id: String,
    duration_secs: u32,
    width: u32,
    height: u32,
    message: String,
}

impl PreviewReport {
    fn new(artifact: &GeneratedArtifact, record: PreviewRecord) -> Self {
        Self {
            request_id: record.request_id,
            code_path: record.code_path.display().to_string(),
            component_name: record.component_name,
            composition_id: record.composition_id,
            duration_secs: artifact.duration_secs,
            width: artifact.width,
            height: artifact.height,
            message: record.summary_message,
        }
    }
}

/// Apply command-line overrides on top of the environment.
pub fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = PipelineConfig::from_env().context("load configuration")?;
    if let Some(dir) = &cli.preview_dir {
        config.preview_dir = dir.clone();
    }
    if let Some(url) = &cli.renderer_url {
        config.renderer.url = url.clone();
    }
    Ok(config)
}

pub async fn run(cli: Cli) -> anyhow::Result<Report> {
    let config = load_config(&cli)?;
    let pipeline = Pipeline::from_config(&config).context("build pipeline")?;

    match cli.cmd {
        Command::Generate(args) => generate(&pipeline, args).await,
        Command::Revise(args) => revise(&pipeline, args).await,
        Command::Render(args) => render(&pipeline, args).await,
    }
}

async fn generate(pipeline: &Pipeline, args: GenerateArgs) -> anyhow::Result<Report> {
    let request_id = args
        .request_id
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

    let mut request = GenerationRequest::new(args.instruction, args.duration, args.format)
        .with_style(args.style)
        .with_video_context(args.context);
    for (name, location) in args.assets {
        request = request.with_asset(name, location);
    }

    let (artifact, record) = pipeline
        .generate_and_preview(&request, &request_id)
        .await
        .context("generate motion graphic")?;

    Report::ok(PreviewReport::new(&artifact, record))
}

async fn revise(pipeline: &Pipeline, args: ReviseArgs) -> anyhow::Result<Report> {
    let (artifact, record) = pipeline
        .revise_and_preview(&args.request_id, &args.feedback)
        .await
        .context("revise motion graphic")?;

    Report::ok(PreviewReport::new(&artifact, record))
}

async fn render(pipeline: &Pipeline, args: RenderArgs) -> anyhow::Result<Report> {
    let store = pipeline.preview_store();
    let code = store
        .read_code(&args.request_id)
        .await
        .context("load stored code")?;
    let job = resolve_render_job(store, &args, &code)?;

    tracing::info!(
        request_id = %args.request_id,
        composition_id = %job.composition_id,
        duration_secs = job.duration_secs,
        "Rendering stored preview",
    );

    let outcome = pipeline.render(&job).await;
    let success = outcome.is_success();
    Ok(Report {
        body: serde_json::to_value(&outcome)?,
        success,
    })
}

/// Fill the job from explicit arguments first, then from the stored
/// code's config object, then from render defaults.
pub fn resolve_render_job(
    store: &PreviewStore,
    args: &RenderArgs,
    code: &str,
) -> anyhow::Result<RenderJob> {
    let scanned = scan_composition_config(code);
    let code_path = store.code_path(&args.request_id)?;

    let composition_id = args
        .composition_id
        .clone()
        .or(scanned.id)
        .unwrap_or_else(|| component_name_from_code(code));
    let output_name = args
        .output_name
        .clone()
        .unwrap_or_else(|| args.request_id.clone());

    let mut job = RenderJob::new(code_path, composition_id, output_name);
    if let Some(duration) = args.duration.or(scanned.duration_secs) {
        job = job.with_duration(duration);
    }
    match (args.format, scanned.width, scanned.height) {
        (Some(format), _, _) => job = job.with_dimensions(format.dimensions()),
        (None, Some(width), Some(height)) => {
            job.width = width;
            job.height = height;
        }
        _ => {}
    }
    Ok(job)
}
