// photoproc/src/cli/batch.rs
use crate::core::processor::PhotoProcessor;
use crate::core::{ImageToolError, OutputEncoding, ProcessConfig, Result};
use crate::utils::is_supported_format;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

/// Thumbnails a directory of images in parallel.
pub struct BatchProcessor {
    processor: PhotoProcessor,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    pub fn new(config: ProcessConfig, max_threads: usize) -> Result<Self> {
        config.validate()?;

        let thread_pool = if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    ImageToolError::InvalidParameter(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            processor: PhotoProcessor::new(config),
            thread_pool,
        })
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        size: (u32, u32),
        transparent: bool,
        recursive: bool,
    ) -> Result<ProcessingStats> {
        self.validate_paths(input_dir, output_dir)?;

        let image_paths = self.collect_image_paths(input_dir, recursive);

        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        std::fs::create_dir_all(output_dir)?;

        let pb = self.create_progress_bar(image_paths.len());
        let encoding = OutputEncoding::from_transparency(transparent);

        let run = || -> Vec<(PathBuf, Result<(u64, u64)>)> {
            image_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|path| {
                    let result = self.thumbnail_one(path, output_dir, size, encoding);
                    (path.clone(), result)
                })
                .collect()
        };

        let results = match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut stats = ProcessingStats::default();
        for (path, result) in results {
            match result {
                Ok((before, after)) => {
                    stats.processed_count += 1;
                    stats.total_size_before += before;
                    stats.total_size_after += after;
                }
                Err(e) => {
                    log::warn!("Failed to process {}: {}", path.display(), e);
                    stats.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!("Processed {} images", stats.processed_count));

        Ok(stats)
    }

    fn thumbnail_one(
        &self,
        input_path: &Path,
        output_dir: &Path,
        (width, height): (u32, u32),
        encoding: OutputEncoding,
    ) -> Result<(u64, u64)> {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ImageToolError::InvalidParameter(format!(
                    "Invalid file name: {}",
                    input_path.display()
                ))
            })?;

        let original_size = std::fs::metadata(input_path)?.len();
        let reader = BufReader::new(File::open(input_path)?);
        let data = self.processor.thumbnail(
            reader,
            width,
            height,
            encoding == OutputEncoding::Transparent,
        )?;

        let output_path = output_dir.join(format!("{}.{}", stem, encoding.extension()));
        std::fs::write(&output_path, &data)?;

        Ok((original_size, data.len() as u64))
    }

    fn collect_image_paths(&self, input_dir: &Path, recursive: bool) -> Vec<PathBuf> {
        let walker = if recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        let mut paths: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_supported_format(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();
        paths
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(ImageToolError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ImageToolError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if input_dir == output_dir {
            return Err(ImageToolError::InvalidParameter(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
