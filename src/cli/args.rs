// photoproc/src/cli/args.rs
use crate::core::{CropRegion, ResizeAlgorithm, SliceLine};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photoproc", version, about = "Crop, slice, trim and thumbnail uploaded photos")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JPEG quality for opaque output (1-100)
    #[arg(short, long, default_value_t = 85, global = true)]
    pub quality: u8,

    /// Skip the oxipng pass on transparent output
    #[arg(long, global = true)]
    pub no_optimize: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Square-crop, crop and/or slice an image into one or more files
    Process {
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Centre-crop to a square first
        #[arg(long)]
        square: bool,

        /// Crop region as x,y,width,height
        #[arg(long)]
        crop: Option<CropRegion>,

        /// Cut line, h:<y> or v:<x>; repeatable
        #[arg(long = "slice")]
        slices: Vec<SliceLine>,

        /// Write PNG with alpha instead of JPEG
        #[arg(short, long)]
        transparent: bool,
    },

    /// Scale an image to fit inside a box
    Thumbnail {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        #[arg(short, long)]
        transparent: bool,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,
    },

    /// Remove a uniform border and print where the content sat
    Trim {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        transparent: bool,

        /// Per-channel colour tolerance for the border
        #[arg(long, default_value_t = 0)]
        fuzz: u8,
    },

    /// Print dimensions, file size and GPS position
    Info { input: PathBuf },

    /// Thumbnail every image in a directory
    Batch {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        #[arg(short, long)]
        transparent: bool,

        /// Number of worker threads (0 = rayon default)
        #[arg(long, default_value_t = 0)]
        threads: usize,

        #[arg(short, long)]
        recursive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}
