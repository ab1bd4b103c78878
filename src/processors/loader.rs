// photoproc/src/processors/loader.rs
use crate::core::{DecodeError, DecodedImage, Dimensions, MAX_ENCODED_SIDE};
use image::{ImageError, ImageReader, Limits};
use std::io::{BufRead, Seek};

#[derive(Debug, Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((MAX_ENCODED_SIDE, MAX_ENCODED_SIDE)),
        }
    }

    pub fn with_max_dimensions(mut self, limit: Option<(u32, u32)>) -> Self {
        self.max_dimensions = limit;
        self
    }

    pub fn decode<R: BufRead + Seek>(&self, input: R) -> Result<DecodedImage, DecodeError> {
        let reader = self.open(input)?;
        let format = reader.format();

        let image = reader.decode().map_err(map_image_error)?;

        log::debug!(
            "Decoded {:?} image: {}x{} pixels, color: {:?}",
            format,
            image.width(),
            image.height(),
            image.color()
        );

        Ok(DecodedImage::new(image))
    }

    /// Read only as much of the stream as needed to learn the image size.
    pub fn probe<R: BufRead + Seek>(&self, input: R) -> Result<Dimensions, DecodeError> {
        let reader = self.open(input)?;
        let (width, height) = reader.into_dimensions().map_err(map_image_error)?;

        Ok(Dimensions { width, height })
    }

    fn open<R: BufRead + Seek>(&self, input: R) -> Result<ImageReader<R>, DecodeError> {
        let mut reader = ImageReader::new(input).with_guessed_format()?;

        if reader.format().is_none() {
            return Err(DecodeError::UnsupportedFormat(
                "unrecognized image signature".to_string(),
            ));
        }

        let mut limits = Limits::default();
        if let Some((max_w, max_h)) = self.max_dimensions {
            limits.max_image_width = Some(max_w);
            limits.max_image_height = Some(max_h);
        }
        reader.limits(limits);

        Ok(reader)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
        ImageError::Limits(e) => DecodeError::LimitExceeded(e.to_string()),
        ImageError::IoError(e) => DecodeError::Io(e),
        other => DecodeError::Corrupt(other),
    }
}
