// photoproc/src/processors/resizer.rs
use crate::core::{DecodedImage, ImageToolError, ResizeAlgorithm, Result, MAX_ENCODED_SIDE};
use crate::utils::fit_within;
use image::imageops::FilterType;

pub struct Resizer {
    algorithm: ResizeAlgorithm,
    max_dimensions: (u32, u32),
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self {
            algorithm,
            max_dimensions: (MAX_ENCODED_SIDE, MAX_ENCODED_SIDE),
        }
    }

    /// Largest output allowed; upscaling past it is an error.
    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = (width, height);
        self
    }

    /// Scale to fit inside `width` x `height`, keeping the aspect ratio.
    ///
    /// The result may be smaller than the box on one axis. Targets larger than
    /// the source upscale with the same formula.
    pub fn thumbnail(&self, image: DecodedImage, width: u32, height: u32) -> Result<DecodedImage> {
        if width == 0 || height == 0 {
            return Err(ImageToolError::InvalidParameter(format!(
                "Thumbnail target {}x{} must be non-zero",
                width, height
            )));
        }

        let (new_width, new_height) = fit_within(image.width(), image.height(), width, height);
        let (max_width, max_height) = self.max_dimensions;
        if new_width > max_width || new_height > max_height {
            return Err(ImageToolError::InvalidParameter(format!(
                "Thumbnail {}x{} exceeds the {}x{} limit",
                new_width, new_height, max_width, max_height
            )));
        }

        if new_width == image.width() && new_height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            let mut unchanged = image;
            unchanged.repage();
            return Ok(unchanged);
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} (box {}x{})",
            image.width(),
            image.height(),
            new_width,
            new_height,
            width,
            height
        );

        let resized = image
            .image()
            .resize_exact(new_width, new_height, self.filter_type());

        let mut result = DecodedImage::new(resized);
        result.repage();
        Ok(result)
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
