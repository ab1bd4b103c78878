// photoproc/src/cli/mod.rs
mod args;
mod batch;

pub use args::{Algorithm, Cli, Commands};
pub use batch::{BatchProcessor, ProcessingStats};

use crate::core::processor::PhotoProcessor;
use crate::core::{ProcessConfig, ProcessOptions};
use crate::utils::{calculate_aspect_ratio, format_file_size, generate_output_path};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Run one parsed command line. Logging must already be initialised.
pub fn run(cli: Cli) -> Result<()> {
    let base = ProcessConfig {
        jpeg_quality: cli.quality,
        optimize_png: !cli.no_optimize,
        ..Default::default()
    };

    match cli.command {
        Commands::Process {
            input,
            output,
            square,
            crop,
            slices,
            transparent,
        } => {
            let options = ProcessOptions {
                square_crop: square,
                crop,
                slices,
                transparent,
            };
            process_image(&input, &output, &options, base)
        }
        Commands::Thumbnail {
            input,
            output,
            width,
            height,
            transparent,
            algorithm,
        } => {
            let config = ProcessConfig {
                algorithm: algorithm.into(),
                ..base
            };
            thumbnail_image(&input, &output, width, height, transparent, config)
        }
        Commands::Trim {
            input,
            output,
            transparent,
            fuzz,
        } => {
            let config = ProcessConfig {
                trim_fuzz: fuzz,
                ..base
            };
            trim_image(&input, &output, transparent, config)
        }
        Commands::Info { input } => print_info(&input, base),
        Commands::Batch {
            input,
            output,
            width,
            height,
            transparent,
            threads,
            recursive,
        } => {
            let processor = BatchProcessor::new(base, threads)?;
            let stats = processor.process_directory(
                &input,
                &output,
                (width, height),
                transparent,
                recursive,
            )?;

            println!(
                "Batch processing complete. Processed {} images to: {}",
                stats.processed_count,
                output.display()
            );
            println!(
                "Total size: {} -> {}",
                format_file_size(stats.total_size_before),
                format_file_size(stats.total_size_after)
            );
            for (path, error) in &stats.errors {
                eprintln!("  failed {}: {}", path, error);
            }
            Ok(())
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn build_processor(config: ProcessConfig) -> Result<PhotoProcessor> {
    config.validate()?;
    Ok(PhotoProcessor::new(config))
}

fn process_image(
    input: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
    config: ProcessConfig,
) -> Result<()> {
    let processor = build_processor(config)?;
    let pieces = processor
        .process(open(input)?, options)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    std::fs::create_dir_all(output_dir)?;
    let extension = options.encoding().extension();

    for piece in pieces.iter().filter(|p| !p.is_degenerate()) {
        let suffix = format!("{}_{}", piece.origin_x, piece.origin_y);
        let path = generate_output_path(input, output_dir, &suffix, extension);
        std::fs::write(&path, &piece.data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved {}x{} piece to {}", piece.width, piece.height, path.display());
    }

    println!(
        "Wrote {} image(s) to: {}",
        pieces.iter().filter(|p| !p.is_degenerate()).count(),
        output_dir.display()
    );
    Ok(())
}

fn thumbnail_image(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    transparent: bool,
    config: ProcessConfig,
) -> Result<()> {
    let processor = build_processor(config)?;
    let data = processor
        .thumbnail(open(input)?, width, height, transparent)
        .with_context(|| format!("Failed to create thumbnail of {}", input.display()))?;

    write_output(output, &data)?;
    println!("Thumbnail saved to: {}", output.display());
    Ok(())
}

fn trim_image(input: &Path, output: &Path, transparent: bool, config: ProcessConfig) -> Result<()> {
    let processor = build_processor(config)?;
    let trimmed = processor
        .trim(open(input)?, transparent)
        .with_context(|| format!("Failed to trim {}", input.display()))?;

    write_output(output, &trimmed.data)?;
    println!(
        "Trimmed to {}x{} at offset ({}, {}), saved to: {}",
        trimmed.width,
        trimmed.height,
        trimmed.origin_x,
        trimmed.origin_y,
        output.display()
    );
    Ok(())
}

fn print_info(input: &Path, config: ProcessConfig) -> Result<()> {
    let processor = build_processor(config)?;
    let file_size = std::fs::metadata(input)
        .with_context(|| format!("File does not exist: {}", input.display()))?
        .len();

    let dims = processor.dimensions(open(input)?)?;
    let gps = processor.gps_coordinates(open(input)?)?;
    let aspect_ratio = calculate_aspect_ratio(dims.width, dims.height);

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", dims.width, dims.height);
    println!("Aspect Ratio: {:.2}:1", aspect_ratio);
    match gps {
        Some(c) => println!("GPS: {:.6}, {:.6}", c.latitude, c.longitude),
        None => println!("GPS: none"),
    }

    let content_type = image::ImageFormat::from_path(input)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    match processor.validate_upload(open(input)?, content_type, file_size) {
        Ok(_) => println!("Upload policy: ok"),
        Err(e) => println!("Upload policy: {}", e),
    }

    Ok(())
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {} ({} bytes)", path.display(), data.len());
    Ok(())
}
