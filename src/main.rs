use clap::Parser;
use pixfit::{RustBackend, SizeProfile, compress_and_save};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixfit")]
#[command(about = "Compress a photograph into a bounded envelope")]
#[command(long_about = "\
Compress a photograph into a bounded envelope

Shrinks the source to fit the chosen size profile while preserving aspect
ratio and correcting EXIF rotation. Files under 100 KiB pass through at
their original dimensions. The output format follows the destination
extension: .png is lossless, everything else is maximum-quality JPEG.")]
#[command(version)]
struct Cli {
    /// Source image (JPEG, PNG, TIFF, or WebP)
    source: PathBuf,

    /// Destination file
    dest: PathBuf,

    /// Target envelope: hd, full-hd, quad-hd, or WIDTHxHEIGHT
    #[arg(long, default_value = "full-hd")]
    size: SizeProfile,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let backend = RustBackend::new();
    let image = compress_and_save(&backend, &cli.source, &cli.dest, cli.size)?;
    println!(
        "{} -> {} ({}x{})",
        cli.source.display(),
        cli.dest.display(),
        image.width(),
        image.height()
    );
    Ok(())
}
