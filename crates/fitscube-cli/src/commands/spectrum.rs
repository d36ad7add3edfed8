use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use fitscube_core::aggregate::spectrum;
use fitscube_core::config::ViewerConfig;
use fitscube_core::loader::load_directory;
use fitscube_core::region::Region;
use fitscube_core::store::{FrameStore, LoadState};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::summary::print_spectrum_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Args)]
pub struct SpectrumArgs {
    /// Directory of FITS frames
    pub dir: PathBuf,

    /// Left edge of the region (inclusive)
    #[arg(long)]
    pub x_min: usize,

    /// Right edge of the region (exclusive)
    #[arg(long)]
    pub x_max: usize,

    /// Top edge of the region (inclusive)
    #[arg(long)]
    pub y_min: usize,

    /// Bottom edge of the region (exclusive)
    #[arg(long)]
    pub y_max: usize,

    /// Current frame index reported alongside the series
    #[arg(long, default_value = "0")]
    pub frame: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Viewer config TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SpectrumArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    let region = Region::checked(args.x_min, args.x_max, args.y_min, args.y_max)?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    pb.set_message("Loading frames");

    let mut store = FrameStore::new();
    let generation = store.begin_load(&args.dir, config.load_policy)?;
    let result = load_directory(&args.dir, &config, |pct| pb.set_position(pct as u64));
    match &result {
        Ok(_) => pb.finish_with_message("Loaded"),
        Err(_) => pb.abandon_with_message("Load failed"),
    }
    store.finish(generation, result);

    if let LoadState::Failed(failure) = store.state() {
        anyhow::bail!("{}\n{}", failure, failure.trace);
    }
    let report = spectrum(&store, &region, args.frame)?;
    info!("Spectrum over {region}: {} frames", report.len());

    print_spectrum_summary(&args.dir, &report);

    match args.format {
        OutputFormat::Csv => {
            println!("frame,sum");
            for (i, v) in report.series.iter().enumerate() {
                println!("{i},{v}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
