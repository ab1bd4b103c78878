// photoproc/src/processors/cropper.rs
use crate::core::{CropRegion, DecodedImage, Result};

/// Square and rectangular crops. Every crop is followed by a repage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cropper;

impl Cropper {
    pub fn new() -> Self {
        Self
    }

    /// Centre-gravity crop to a `min(width, height)` square.
    pub fn crop_to_square(&self, image: DecodedImage) -> DecodedImage {
        let (width, height) = (image.width(), image.height());
        let side = width.min(height);

        if side == width && side == height {
            return image;
        }

        let x = (width - side) / 2;
        let y = (height - side) / 2;

        log::debug!(
            "Square crop {}x{} -> {}x{} at ({}, {})",
            width,
            height,
            side,
            side,
            x,
            y
        );

        let mut cropped = image.crop_unchecked(x, y, side, side);
        cropped.repage();
        cropped
    }

    pub fn crop(&self, image: &DecodedImage, region: &CropRegion) -> Result<DecodedImage> {
        region.validate(image.width(), image.height())?;

        log::debug!(
            "Cropping {}x{} at ({}, {}) from {}x{}",
            region.width,
            region.height,
            region.x,
            region.y,
            image.width(),
            image.height()
        );

        // validate() guarantees every field is non-negative and fits in u32.
        let mut cropped = image.crop_unchecked(
            region.x as u32,
            region.y as u32,
            region.width as u32,
            region.height as u32,
        );
        cropped.repage();
        Ok(cropped)
    }
}
