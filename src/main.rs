//! Gesture capture application: replays a recorded landmark session through the workflow.

use anyhow::{Context, Result};
use clap::Parser;
use gesture_capture::{
    app::CaptureApp,
    config::{Config, EXAMPLE_CONFIG},
    persistence::PngSink,
    render::HeadlessRenderer,
    replay::ReplaySource,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark session (JSON lines)
    #[arg(short, long, required_unless_present = "print_config")]
    replay: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Directory the final photo is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write every composed frame to this directory
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Frame rate for replay records without timestamps
    #[arg(long)]
    fps: Option<f64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Gesture Capture");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(dir) = args.output_dir {
        config.output.directory = dir;
    }
    if let Some(dir) = args.preview_dir {
        config.display.preview_dir = Some(dir);
    }
    if let Some(fps) = args.fps {
        config.replay.fps = fps;
    }
    config.validate().context("Invalid configuration")?;

    let replay_path = args.replay.context("--replay is required")?;
    let source = ReplaySource::open(&replay_path, &config.replay)?;
    let renderer = HeadlessRenderer::new(config.display.preview_dir.clone());
    let sink = PngSink::from_config(&config.output);

    // Create and run application
    let mut app = CaptureApp::new(&config, source, renderer, sink);
    let summary = app.run()?;

    info!(
        "Processed {} frames, finished in mode '{}'",
        summary.frames, summary.final_mode
    );
    match summary.saved {
        Some(path) => println!("{}", path.display()),
        None => info!("No photo was saved"),
    }

    Ok(())
}
