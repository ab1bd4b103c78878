// photoproc/src/processors/compressor.rs
use crate::core::{DecodedImage, ImageToolError, OutputEncoding, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::DynamicImage;
use oxipng::{optimize_from_memory, Options};

pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: true,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn encode(&self, image: &DecodedImage, encoding: OutputEncoding) -> Result<Vec<u8>> {
        let data = match encoding {
            OutputEncoding::Opaque => self.encode_jpeg(image.image())?,
            OutputEncoding::Transparent => self.encode_png(image.image())?,
        };

        log::debug!(
            "Encoded {}x{} image as {} ({} bytes)",
            image.width(),
            image.height(),
            encoding.mime_type(),
            data.len()
        );

        Ok(data)
    }

    fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        // JPEG has no alpha channel; flatten to three channels first.
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
        let mut buffer = Vec::new();

        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ImageToolError::Encode(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
        let mut buffer = Vec::new();

        let encoder = PngEncoder::new(&mut buffer);
        rgba.write_with_encoder(encoder)
            .map_err(|e| ImageToolError::Encode(format!("PNG encoding failed: {}", e)))?;

        if self.optimize_png {
            return self.optimize_png_bytes(&buffer);
        }

        Ok(buffer)
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| ImageToolError::Encode(format!("PNG optimization failed: {}", e)))
    }
}
