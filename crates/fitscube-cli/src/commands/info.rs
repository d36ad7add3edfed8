use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitscube_core::io::directory::list_frame_files;
use fitscube_core::io::fits::FitsReader;
use tracing::{info, warn};

#[derive(Args)]
pub struct InfoArgs {
    /// Directory of FITS frames
    pub dir: PathBuf,

    /// List files sorted by name instead of directory order
    #[arg(long)]
    pub sort: bool,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let files = list_frame_files(&args.dir, args.sort)
        .with_context(|| format!("Failed to list {}", args.dir.display()))?;
    info!("Listed {} files in {}", files.len(), args.dir.display());

    println!("Directory:   {}", args.dir.display());
    println!("Frames:      {}", files.len());
    println!();
    println!("{:>5}  {:<32}  {:>11}  {:>6}", "#", "File", "Size", "BITPIX");
    println!("{}", "-".repeat(60));

    let mut total_bytes = 0usize;
    for (i, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match FitsReader::open(path).and_then(|mut r| {
            let dims = r.image_dimensions()?;
            total_bytes += r.data_byte_size()?;
            Ok((dims, r.bitpix()?))
        }) {
            Ok(((w, h), bitpix)) => {
                println!("{:>5}  {:<32}  {:>11}  {:>6}", i, name, format!("{w}x{h}"), bitpix)
            }
            Err(e) => {
                warn!("Cannot read {}: {e}", path.display());
                println!("{:>5}  {:<32}  unreadable: {}", i, name, e)
            }
        }
    }

    let Some(first) = files.first() else {
        return Ok(());
    };
    let info = FitsReader::open(first)
        .and_then(|mut r| r.info(first))
        .with_context(|| format!("Failed to read header of {}", first.display()))?;

    println!();
    println!("First frame: {}", info.filename.display());
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("BITPIX:      {}", info.bitpix);
    println!("BZERO:       {}", info.bzero);
    println!("BSCALE:      {}", info.bscale);
    if let Some(ref obj) = info.object {
        println!("Object:      {}", obj);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }
    if let Some(ref date) = info.date_obs {
        println!("Date:        {}", date);
    }
    if let Some(exp) = info.exposure {
        println!("Exposure:    {} s", exp);
    }

    let total_mb = total_bytes as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}
