mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitscube", about = "FITS frame-stack inspection and region spectra")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the frames of a directory and show the first header
    Info(commands::info::InfoArgs),
    /// Sum a region over every frame of a directory
    Spectrum(commands::spectrum::SpectrumArgs),
    /// Print or save the default viewer configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
