// src/main.rs

use anyhow::Result;
use clap::Parser;
use hands_off_detection::export::write_observations_csv;
use hands_off_detection::{Config, EventSink, FrameSource, HandOffPipeline};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Find the intervals where the driver's hands leave the steering wheel.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Directory of per-frame pose JSON records
    #[arg(short, long)]
    input: Option<String>,

    /// File the hand-off events are appended to
    #[arg(short, long)]
    output: Option<String>,

    /// Process at most this many frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Video frame rate used to convert frames to timestamps
    #[arg(long)]
    fps: Option<f64>,

    /// Also write the per-frame wrist table to this CSV file
    #[arg(long)]
    observations_csv: Option<String>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.video.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.video.output_path = output.clone();
        }
        if let Some(max_frames) = self.max_frames {
            config.video.max_frames = Some(max_frames);
        }
        if let Some(fps) = self.fps {
            config.video.fps = fps;
        }
        if let Some(csv) = &self.observations_csv {
            config.video.observations_csv = Some(csv.clone());
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

fn load_config(path: &Path) -> Result<(Config, bool)> {
    if path.exists() {
        Ok((Config::load(path)?, true))
    } else {
        Ok((Config::default(), false))
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hands_off_detection={}", level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, from_file) = load_config(&cli.config)?;
    cli.apply_overrides(&mut config);
    init_logging(&config.logging.level);

    info!("🚗 Hands-off-wheel detection starting");
    if from_file {
        info!("✓ Configuration loaded from {}", cli.config.display());
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
    }

    if let Err(e) = run(&config) {
        error!("❌ {:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    config.validate()?;

    info!(
        "Wheel: {} regions, padding={:.1} | debounce={} gap={} | fps={:.2}",
        config.wheel.regions.len(),
        config.wheel.padding,
        config.temporal.debounce_buffer,
        config.temporal.range_gap,
        config.video.fps
    );

    let source = FrameSource::discover(&config.video.input_dir, config.video.max_frames)?;
    if source.is_empty() {
        warn!("No pose records found in {}", config.video.input_dir);
    }
    let loaded = source.load()?;

    let pipeline = HandOffPipeline::new(config);
    let report = pipeline.run(&loaded);

    EventSink::append(&config.video.output_path, &report.events())?;

    if let Some(csv_path) = &config.video.observations_csv {
        write_observations_csv(csv_path, &report)?;
    }

    let stats = &report.stats;
    info!("\n✓ Run complete");
    info!("  Total frames: {}", stats.total_frames);
    info!("  Skipped frames: {}", stats.skipped_frames);
    for side in &stats.sides {
        info!(
            "  {} wrist: {} on / {} off-wheel ({} absent), {} after debounce, {} ranges",
            side.side,
            side.on_wheel_frames,
            side.off_wheel_frames,
            side.absent_frames,
            side.debounced_frames,
            side.ranges
        );
    }
    info!("  Events written: {}", stats.events);

    Ok(())
}
