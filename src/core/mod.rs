// photoproc/src/core/mod.rs
pub mod processor;
mod types;

use thiserror::Error;

pub use types::{
    CropRegion, DecodedImage, Dimensions, GpsCoordinate, OutputEncoding, SliceDirection,
    SliceLine, SlicedImage,
};

/// Largest side the opaque (JPEG) encoder can write.
pub const MAX_ENCODED_SIDE: u32 = 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Constant configuration shared by every call of a [`processor::PhotoProcessor`].
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub jpeg_quality: u8,
    pub optimize_png: bool,
    pub algorithm: ResizeAlgorithm,
    /// Decode limit, also the largest thumbnail that may be produced.
    /// `None` falls back to [`MAX_ENCODED_SIDE`] for thumbnails.
    pub max_dimensions: Option<(u32, u32)>,
    /// Per-channel tolerance used when matching the border colour during trim.
    pub trim_fuzz: u8,
    pub min_size: u32,
    pub max_size: u32,
    pub max_file_size: u64,
}

/// Per-call options for [`processor::PhotoProcessor::process`].
///
/// Steps run in field order: square crop, region crop, then slicing. Slice
/// coordinates are relative to the image produced by the earlier steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOptions {
    pub square_crop: bool,
    pub crop: Option<CropRegion>,
    pub slices: Vec<SliceLine>,
    pub transparent: bool,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 85,
            optimize_png: true,
            algorithm: ResizeAlgorithm::Lanczos3,
            max_dimensions: Some((MAX_ENCODED_SIDE, MAX_ENCODED_SIDE)),
            trim_fuzz: 0,
            min_size: 256,
            max_size: 4096,
            max_file_size: 4 * 1024 * 1024,
        }
    }
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ImageToolError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        if let Some((w, h)) = self.max_dimensions {
            if w == 0 || h == 0 {
                return Err(ImageToolError::InvalidParameter(
                    "Maximum dimensions must be non-zero".to_string(),
                ));
            }
            if w > MAX_ENCODED_SIDE || h > MAX_ENCODED_SIDE {
                return Err(ImageToolError::InvalidParameter(format!(
                    "Maximum dimensions {}x{} exceed the encodable limit of {}",
                    w, h, MAX_ENCODED_SIDE
                )));
            }
        }

        if self.min_size > self.max_size {
            return Err(ImageToolError::InvalidParameter(format!(
                "Minimum size {} exceeds maximum size {}",
                self.min_size, self.max_size
            )));
        }

        Ok(())
    }
}

impl ProcessOptions {
    pub fn square(transparent: bool) -> Self {
        Self {
            square_crop: true,
            transparent,
            ..Default::default()
        }
    }

    pub fn with_crop(mut self, crop: CropRegion) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn with_slices(mut self, slices: Vec<SliceLine>) -> Self {
        self.slices = slices;
        self
    }

    pub fn encoding(&self) -> OutputEncoding {
        OutputEncoding::from_transparency(self.transparent)
    }
}

/// Failure to turn input bytes into pixels.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt image data: {0}")]
    Corrupt(#[source] image::ImageError),

    #[error("Image exceeds decoder limits: {0}")]
    LimitExceeded(String),

    #[error("IO error while reading image: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content type '{0}' is not an image")]
    NotAnImage(String),

    #[error("File size {size} exceeds limit {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Image must be at least {min}x{min} pixels, got {width}x{height}")]
    TooSmall { width: u32, height: u32, min: u32 },

    #[error("Image must be at most {max}x{max} pixels, got {width}x{height}")]
    TooLarge { width: u32, height: u32, max: u32 },
}

#[derive(Error, Debug)]
pub enum ImageToolError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid crop region: {0}")]
    InvalidCrop(String),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageToolError {
    pub fn is_decode_error(&self) -> bool {
        matches!(self, ImageToolError::Decode(_))
    }

    pub fn is_invalid_crop(&self) -> bool {
        matches!(self, ImageToolError::InvalidCrop(_))
    }
}

pub type Result<T> = std::result::Result<T, ImageToolError>;

pub fn validate_config(config: &ProcessConfig) -> Result<()> {
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ProcessConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let config = ProcessConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ImageToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn max_dimensions_are_capped_at_encodable_side() {
        let at_limit = ProcessConfig {
            max_dimensions: Some((MAX_ENCODED_SIDE, MAX_ENCODED_SIDE)),
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_wide = ProcessConfig {
            max_dimensions: Some((MAX_ENCODED_SIDE + 1, 10)),
            ..Default::default()
        };
        assert!(matches!(
            too_wide.validate(),
            Err(ImageToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_inverted_size_policy() {
        let config = ProcessConfig {
            min_size: 5000,
            max_size: 4096,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn options_builder_selects_encoding() {
        let options = ProcessOptions::square(true).with_slices(vec![SliceLine::vertical(10)]);
        assert!(options.square_crop);
        assert_eq!(options.slices.len(), 1);
        assert_eq!(options.encoding(), OutputEncoding::Transparent);
        assert_eq!(ProcessOptions::default().encoding(), OutputEncoding::Opaque);
    }
}
