use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use framemod::{
    EngineConfig, FfmpegEncoder, FramemodError, FramemodResult, ModChain, RawParams,
    RenderRequest, Studio,
};

#[derive(Parser, Debug)]
#[command(name = "framemod", version)]
struct Cli {
    /// Engine config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of mod manifests (overrides the config).
    #[arg(long, global = true)]
    plugins: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the mod catalog as JSON.
    Mods,
    /// Write the final frame as a PNG without encoding.
    Preview(PreviewArgs),
    /// Render an MP4 (requires `ffmpeg` and `ffprobe`).
    Render(RenderArgs),
    /// Invoke a mod action and print its result.
    Action(ActionArgs),
}

#[derive(Parser, Debug)]
struct CanvasArgs {
    /// Platform tag: youtube, tiktok or square.
    #[arg(long, default_value = "square")]
    platform: String,

    /// Background style: plain-black, blurred-backdrop or dominant-color-frame.
    #[arg(long, default_value = "plain-black")]
    style: String,

    /// Mod chain JSON file.
    #[arg(long)]
    chain: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Audio track.
    #[arg(long)]
    audio: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct ActionArgs {
    /// Mod name.
    #[arg(long = "mod")]
    mod_name: String,

    /// Action name.
    #[arg(long)]
    action: String,

    /// Parameter map as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            match serde_json::to_string_pretty(&e.report()) {
                Ok(report) => eprintln!("{report}"),
                Err(_) => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries command output. `RUST_LOG` overrides the level.
fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> FramemodResult<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = cli.plugins {
        config.plugin_dir = Some(dir);
    }
    let encoder = FfmpegEncoder::from_config(&config);
    let studio = Studio::new(config)?;

    match cli.cmd {
        Command::Mods => cmd_mods(&studio),
        Command::Preview(args) => cmd_preview(&studio, args),
        Command::Render(args) => cmd_render(&studio, &encoder, args),
        Command::Action(args) => cmd_action(&studio, args),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> FramemodResult<()> {
    let s = serde_json::to_string_pretty(value).map_err(|e| FramemodError::serde(e.to_string()))?;
    println!("{s}");
    Ok(())
}

fn read_chain(args: &CanvasArgs) -> FramemodResult<ModChain> {
    match &args.chain {
        Some(path) => ModChain::from_path(path),
        None => Ok(ModChain::new()),
    }
}

fn cmd_mods(studio: &Studio) -> FramemodResult<()> {
    let catalog = studio.catalog();
    for failure in catalog.failures() {
        eprintln!("skipped {}: {}", failure.source_name, failure.reason);
    }
    print_json(&catalog.list())
}

fn cmd_preview(studio: &Studio, args: PreviewArgs) -> FramemodResult<()> {
    let chain = read_chain(&args.canvas)?;
    let frame = studio.preview(
        &args.image,
        &args.canvas.platform,
        &args.canvas.style,
        &chain,
    )?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(studio: &Studio, encoder: &FfmpegEncoder, args: RenderArgs) -> FramemodResult<()> {
    let request = RenderRequest {
        image_path: args.image,
        audio_path: args.audio,
        output_path: args.out,
        chain: read_chain(&args.canvas)?,
        platform: args.canvas.platform,
        style: args.canvas.style,
    };
    let out = studio.render(&request, encoder)?;
    print_json(&out)
}

fn cmd_action(studio: &Studio, args: ActionArgs) -> FramemodResult<()> {
    let params: RawParams = serde_json::from_str(&args.params)
        .map_err(|e| FramemodError::serde(format!("--params must be a JSON object: {e}")))?;
    let result = studio.invoke_action(&args.mod_name, &args.action, &params)?;
    print_json(&result)
}
