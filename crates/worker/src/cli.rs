//! Command-line surface. Each subcommand runs exactly one pipeline step.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use mograph_core::format::VideoFormat;
use mograph_core::types::DEFAULT_STYLE;

#[derive(Parser, Debug)]
#[command(name = "mograph-worker", version, about = "Generate, revise and render motion graphics")]
pub struct Cli {
    /// Override `PREVIEW_DIR`.
    #[arg(long, global = true)]
    pub preview_dir: Option<PathBuf>,

    /// Override `RENDERER_URL`.
    #[arg(long, global = true)]
    pub renderer_url: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate code from an instruction and store it for review.
    Generate(GenerateArgs),
    /// Apply feedback to stored code and store the revision in its place.
    Revise(ReviseArgs),
    /// Render stored code on the remote backend.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the motion graphic should show.
    #[arg(long)]
    pub instruction: String,

    /// Length in seconds (1-5).
    #[arg(long, default_value_t = 5)]
    pub duration: u32,

    /// Aspect format: 16:9, 9:16 or 1:1.
    #[arg(long, default_value = "9:16", value_parser = parse_format)]
    pub format: VideoFormat,

    #[arg(long, default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Free-form background on the surrounding video.
    #[arg(long, default_value = "")]
    pub context: String,

    /// Asset as `name=path`. Repeatable.
    #[arg(long = "asset", value_parser = parse_asset)]
    pub assets: Vec<(String, String)>,

    /// Preview file stem. A fresh UUID when omitted.
    #[arg(long)]
    pub request_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReviseArgs {
    #[arg(long)]
    pub request_id: String,

    /// The change to make.
    #[arg(long)]
    pub feedback: String,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(long)]
    pub request_id: String,

    /// Defaults to the id in the stored code's `compositionConfig`.
    #[arg(long)]
    pub composition_id: Option<String>,

    /// Output file stem. Defaults to the request id.
    #[arg(long)]
    pub output_name: Option<String>,

    /// Defaults to the stored config, else 5.
    #[arg(long)]
    pub duration: Option<u32>,

    /// Defaults to the stored config's size, else 1080x1920.
    #[arg(long, value_parser = parse_format)]
    pub format: Option<VideoFormat>,
}

fn parse_format(raw: &str) -> Result<VideoFormat, String> {
    VideoFormat::parse_strict(raw).map_err(|e| e.to_string())
}

/// Split `name=path` on the first `=`.
pub fn parse_asset(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, location)) if !name.trim().is_empty() && !location.trim().is_empty() => {
            Ok((name.trim().to_string(), location.trim().to_string()))
        }
        _ => Err(format!("expected NAME=PATH, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["mograph-worker", "generate", "--instruction", "Logo reveal"])
            .unwrap();
        let Command::Generate(args) = cli.cmd else {
            panic!("expected generate");
        };
        assert_eq!(args.instruction, "Logo reveal");
        assert_eq!(args.duration, 5);
        assert_eq!(args.format, VideoFormat::Portrait);
        assert_eq!(args.style, "modern");
        assert!(args.assets.is_empty());
        assert!(args.request_id.is_none());
    }

    #[test]
    fn generate_collects_repeated_assets() {
        let cli = Cli::try_parse_from([
            "mograph-worker",
            "generate",
            "--instruction",
            "x",
            "--format",
            "16:9",
            "--asset",
            "logo=/a/logo.png",
            "--asset",
            "bg=https://cdn.example.com/bg.jpg?v=2",
        ])
        .unwrap();
        let Command::Generate(args) = cli.cmd else {
            panic!("expected generate");
        };
        assert_eq!(args.format, VideoFormat::Landscape);
        assert_eq!(
            args.assets,
            vec![
                ("logo".to_string(), "/a/logo.png".to_string()),
                ("bg".to_string(), "https://cdn.example.com/bg.jpg?v=2".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_format_is_rejected_at_the_boundary() {
        let result = Cli::try_parse_from([
            "mograph-worker",
            "generate",
            "--instruction",
            "x",
            "--format",
            "4:3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_overrides_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "mograph-worker",
            "render",
            "--request-id",
            "r1",
            "--preview-dir",
            "/tmp/p",
        ])
        .unwrap();
        assert_eq!(cli.preview_dir, Some(PathBuf::from("/tmp/p")));
        assert_matches!(cli.cmd, Command::Render(RenderArgs { ref request_id, .. }) if request_id == "r1");
    }

    #[test]
    fn asset_parsing() {
        assert_eq!(
            parse_asset("music = ./track.mp3").unwrap(),
            ("music".to_string(), "./track.mp3".to_string())
        );
        assert!(parse_asset("no-separator").is_err());
        assert!(parse_asset("=path").is_err());
        assert!(parse_asset("name=").is_err());
    }
}
