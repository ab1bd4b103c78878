// photoproc/src/core/types.rs
use super::{ImageToolError, Result};
use image::{DynamicImage, ImageFormat};
use std::str::FromStr;

/// A decoded image together with its page offset on the canvas it was cut from.
///
/// Crops record where the new image sat in its parent; [`DecodedImage::repage`]
/// commits the image as its own canvas by resetting that offset to zero.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    page_x: u32,
    page_y: u32,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            page_x: 0,
            page_y: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn page(&self) -> (u32, u32) {
        (self.page_x, self.page_y)
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_inner(self) -> DynamicImage {
        self.image
    }

    /// Copy out a sub-rectangle. The caller guarantees the rectangle is in bounds.
    pub(crate) fn crop_unchecked(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            image: self.image.crop_imm(x, y, width, height),
            page_x: self.page_x + x,
            page_y: self.page_y + y,
        }
    }

    pub fn repage(&mut self) {
        self.page_x = 0;
        self.page_y = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Rectangle to cut out of a source image, in pixels.
///
/// Signed so that out-of-range requests coming from callers can be reported
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CropRegion {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check the region against a source extent. Zero-sized regions are rejected.
    pub fn validate(&self, source_width: u32, source_height: u32) -> Result<()> {
        if self.x < 0 || self.y < 0 {
            return Err(ImageToolError::InvalidCrop(format!(
                "origin ({}, {}) is negative",
                self.x, self.y
            )));
        }

        if self.width <= 0 || self.height <= 0 {
            return Err(ImageToolError::InvalidCrop(format!(
                "size {}x{} must be positive",
                self.width, self.height
            )));
        }

        if self.x.saturating_add(self.width) > i64::from(source_width)
            || self.y.saturating_add(self.height) > i64::from(source_height)
        {
            return Err(ImageToolError::InvalidCrop(format!(
                "{}x{} at ({}, {}) exceeds image bounds {}x{}",
                self.width, self.height, self.x, self.y, source_width, source_height
            )));
        }

        Ok(())
    }
}

impl FromStr for CropRegion {
    type Err = ImageToolError;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ImageToolError::InvalidParameter(format!("Invalid crop '{}': {}", s, e)))?;

        match parts.as_slice() {
            [x, y, w, h] => Ok(Self::new(*x, *y, *w, *h)),
            _ => Err(ImageToolError::InvalidParameter(format!(
                "Invalid crop '{}': expected x,y,width,height",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceDirection {
    Horizontal,
    Vertical,
}

/// A cut along one axis. Horizontal lines cut at a `y`, vertical lines at an `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLine {
    pub direction: SliceDirection,
    pub coordinate: i64,
}

impl SliceLine {
    pub fn horizontal(coordinate: i64) -> Self {
        Self {
            direction: SliceDirection::Horizontal,
            coordinate,
        }
    }

    pub fn vertical(coordinate: i64) -> Self {
        Self {
            direction: SliceDirection::Vertical,
            coordinate,
        }
    }
}

impl FromStr for SliceLine {
    type Err = ImageToolError;

    /// Parses `h:<y>` or `v:<x>`.
    fn from_str(s: &str) -> Result<Self> {
        let (axis, value) = s.split_once(':').ok_or_else(|| {
            ImageToolError::InvalidParameter(format!("Invalid slice '{}': expected h:<y> or v:<x>", s))
        })?;

        let coordinate = value.trim().parse::<i64>().map_err(|e| {
            ImageToolError::InvalidParameter(format!("Invalid slice coordinate '{}': {}", value, e))
        })?;

        match axis.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Self::horizontal(coordinate)),
            "v" | "vertical" => Ok(Self::vertical(coordinate)),
            other => Err(ImageToolError::InvalidParameter(format!(
                "Invalid slice direction '{}'",
                other
            ))),
        }
    }
}

/// Encoded output of one grid cell or trim, with its origin in the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub origin_x: u32,
    pub origin_y: u32,
}

impl SlicedImage {
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Signed decimal degrees; south and west are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Lossy, three channels.
    Opaque,
    /// Lossless, keeps alpha.
    Transparent,
}

impl OutputEncoding {
    pub fn from_transparency(transparent: bool) -> Self {
        if transparent {
            OutputEncoding::Transparent
        } else {
            OutputEncoding::Opaque
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputEncoding::Opaque => ImageFormat::Jpeg,
            OutputEncoding::Transparent => ImageFormat::Png,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputEncoding::Opaque => "image/jpeg",
            OutputEncoding::Transparent => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputEncoding::Opaque => "jpg",
            OutputEncoding::Transparent => "png",
        }
    }
}
