// photoproc/src/processors/trimmer.rs
use crate::core::DecodedImage;
use image::{GenericImageView, Rgba};
use imageproc::rect::Rect;

/// Removes a uniform border whose colour is taken from the top-left pixel.
pub struct Trimmer {
    fuzz: u8,
}

impl Trimmer {
    pub fn new(fuzz: u8) -> Self {
        Self { fuzz }
    }

    /// Returns the trimmed image with its page still pointing at the offset of
    /// the kept region in `image`. Callers read the page, then repage.
    pub fn trim(&self, image: &DecodedImage) -> DecodedImage {
        match self.content_bounds(image) {
            Some(bounds) => {
                log::debug!(
                    "Trim bounds {}x{} at ({}, {}) in {}x{}",
                    bounds.width(),
                    bounds.height(),
                    bounds.left(),
                    bounds.top(),
                    image.width(),
                    image.height()
                );
                image.crop_unchecked(
                    bounds.left() as u32,
                    bounds.top() as u32,
                    bounds.width(),
                    bounds.height(),
                )
            }
            None => {
                log::debug!("Image is a single colour, nothing to trim");
                image.clone()
            }
        }
    }

    /// Smallest rectangle holding every pixel that differs from the border
    /// colour, or `None` when the whole image is border.
    pub fn content_bounds(&self, image: &DecodedImage) -> Option<Rect> {
        let view = image.image();
        let (width, height) = view.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let background = view.get_pixel(0, 0);
        let is_content = |x: u32, y: u32| !self.matches(view.get_pixel(x, y), background);

        let row_has_content = |y: u32| (0..width).any(|x| is_content(x, y));
        let column_has_content = |x: u32, top: u32, bottom: u32| (top..=bottom).any(|y| is_content(x, y));

        let top = (0..height).find(|&y| row_has_content(y))?;
        let bottom = (top..height).rev().find(|&y| row_has_content(y))?;
        let left = (0..width).find(|&x| column_has_content(x, top, bottom))?;
        let right = (left..width)
            .rev()
            .find(|&x| column_has_content(x, top, bottom))?;

        Some(Rect::at(left as i32, top as i32).of_size(right - left + 1, bottom - top + 1))
    }

    fn matches(&self, pixel: Rgba<u8>, background: Rgba<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(background.0.iter())
            .all(|(a, b)| a.abs_diff(*b) <= self.fuzz)
    }
}

impl Default for Trimmer {
    fn default() -> Self {
        Self::new(0)
    }
}
