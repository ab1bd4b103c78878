// photoproc/src/utils/mod.rs
#[cfg(test)]
pub(crate) mod fixtures;

use std::path::{Path, PathBuf};

/// Largest `(w, h)` with the source aspect ratio that fits in the target box.
///
/// `scale = min(tw / sw, th / sh)`, each side rounded and kept at least 1.
pub fn fit_within(source_w: u32, source_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    if source_w == 0 || source_h == 0 {
        return (0, 0);
    }

    let scale_w = f64::from(target_w) / f64::from(source_w);
    let scale_h = f64::from(target_h) / f64::from(source_h);
    let scale = scale_w.min(scale_h);

    let width = (f64::from(source_w) * scale).round() as u32;
    let height = (f64::from(source_h) * scale).round() as u32;

    (width.max(1), height.max(1))
}

/// `[0] ++ sorted(cuts) ++ [extent]`.
pub fn cut_sequence(cuts: impl IntoIterator<Item = i64>, extent: u32) -> Vec<i64> {
    let mut sorted: Vec<i64> = cuts.into_iter().collect();
    sorted.sort_unstable();

    let mut sequence = Vec::with_capacity(sorted.len() + 2);
    sequence.push(0);
    sequence.extend(sorted);
    sequence.push(i64::from(extent));
    sequence
}

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

/// `<dir>/<stem>_<suffix>.<extension>`, with the stem taken from `input`.
pub fn generate_output_path(input: &Path, dir: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_filename)
        .unwrap_or_else(|| "image".to_string());

    dir.join(format!("{}_{}.{}", stem, suffix, extension))
}

pub fn is_supported_format(path: &Path) -> bool {
    let extensions = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn sanitize_filename(filename: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    filename
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}
