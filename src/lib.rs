pub mod cli;
mod core;
mod processors;
mod utils;

pub use crate::core::processor::PhotoProcessor;
pub use crate::core::{
    validate_config, CropRegion, DecodeError, DecodedImage, Dimensions, GpsCoordinate,
    ImageToolError, OutputEncoding, ProcessConfig, ProcessOptions, ResizeAlgorithm, Result,
    SliceDirection, SliceLine, SlicedImage, ValidationError,
};
pub use crate::processors::{
    dms_to_decimal, Compressor, Cropper, GridCell, Loader, MalformedMetadata, MetadataProcessor,
    Resizer, Slicer, Trimmer, UploadValidator,
};
pub use crate::utils::{calculate_aspect_ratio, cut_sequence, fit_within, format_file_size};

pub mod prelude {
    pub use crate::{
        CropRegion, OutputEncoding, PhotoProcessor, ProcessConfig, ProcessOptions, SliceLine,
        SlicedImage,
    };
}

// Pixel buffer taken by `DecodedImage::new` and returned by `into_inner`.
pub use image::DynamicImage;
