// photoproc/src/core/processor.rs
use super::{
    Dimensions, GpsCoordinate, ImageToolError, OutputEncoding, ProcessConfig, ProcessOptions,
    Result, SlicedImage, MAX_ENCODED_SIDE,
};
use crate::processors::{
    Compressor, Cropper, Loader, MetadataProcessor, Resizer, Slicer, Trimmer, UploadValidator,
};
use std::io::{BufRead, Seek, SeekFrom};

/// Entry point for every photo operation.
///
/// Holds configuration only. Each call decodes its own input and drops the
/// pixels before returning, so one processor can be shared across threads.
pub struct PhotoProcessor {
    config: ProcessConfig,
    loader: Loader,
    cropper: Cropper,
    resizer: Resizer,
    trimmer: Trimmer,
    compressor: Compressor,
    metadata_processor: MetadataProcessor,
    validator: UploadValidator,
}

impl PhotoProcessor {
    pub fn new(config: ProcessConfig) -> Self {
        let loader = Loader::new().with_max_dimensions(config.max_dimensions);
        let (max_w, max_h) = config
            .max_dimensions
            .unwrap_or((MAX_ENCODED_SIDE, MAX_ENCODED_SIDE));
        let resizer = Resizer::new(config.algorithm)
            .with_max_dimensions(max_w.min(MAX_ENCODED_SIDE), max_h.min(MAX_ENCODED_SIDE));
        let trimmer = Trimmer::new(config.trim_fuzz);
        let compressor =
            Compressor::new(config.jpeg_quality).with_png_optimization(config.optimize_png);
        let validator = UploadValidator::new(&config);

        Self {
            config,
            loader,
            cropper: Cropper::new(),
            resizer,
            trimmer,
            compressor,
            metadata_processor: MetadataProcessor::new(),
            validator,
        }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Square crop, region crop and grid slicing in one pass.
    ///
    /// Without slices the result is a single cell holding the whole image.
    pub fn process<R: BufRead + Seek>(
        &self,
        input: R,
        options: &ProcessOptions,
    ) -> Result<Vec<SlicedImage>> {
        let mut image = self.loader.decode(input)?;

        if options.square_crop {
            image = self.cropper.crop_to_square(image);
        }

        if let Some(region) = &options.crop {
            image = self.cropper.crop(&image, region)?;
        }

        let pieces = Slicer::new(&self.compressor).slice(&image, &options.slices, options.encoding())?;

        log::info!(
            "Processed {}x{} image into {} piece(s) as {}",
            image.width(),
            image.height(),
            pieces.len(),
            options.encoding().mime_type()
        );

        Ok(pieces)
    }

    /// Like [`process`](Self::process) for callers that want plain bytes.
    pub fn process_single<R: BufRead + Seek>(
        &self,
        input: R,
        options: &ProcessOptions,
    ) -> Result<Vec<u8>> {
        if !options.slices.is_empty() {
            return Err(ImageToolError::InvalidParameter(
                "Slices produce several images; use process() instead".to_string(),
            ));
        }

        let mut pieces = self.process(input, options)?;
        pieces
            .pop()
            .map(|piece| piece.data)
            .ok_or_else(|| ImageToolError::Encode("No image was produced".to_string()))
    }

    pub fn thumbnail<R: BufRead + Seek>(
        &self,
        input: R,
        width: u32,
        height: u32,
        transparent: bool,
    ) -> Result<Vec<u8>> {
        let image = self.loader.decode(input)?;
        let (source_w, source_h) = (image.width(), image.height());
        let thumbnail = self.resizer.thumbnail(image, width, height)?;

        log::info!(
            "Created {}x{} thumbnail from {}x{}",
            thumbnail.width(),
            thumbnail.height(),
            source_w,
            source_h
        );

        self.compressor
            .encode(&thumbnail, OutputEncoding::from_transparency(transparent))
    }

    /// Trim the uniform border. The result's origin is where the kept region
    /// sat in the input.
    pub fn trim<R: BufRead + Seek>(&self, input: R, transparent: bool) -> Result<SlicedImage> {
        let image = self.loader.decode(input)?;
        let mut trimmed = self.trimmer.trim(&image);

        let (origin_x, origin_y) = trimmed.page();
        trimmed.repage();

        log::info!(
            "Trimmed {}x{} image to {}x{} at ({}, {})",
            image.width(),
            image.height(),
            trimmed.width(),
            trimmed.height(),
            origin_x,
            origin_y
        );

        let data = self
            .compressor
            .encode(&trimmed, OutputEncoding::from_transparency(transparent))?;

        Ok(SlicedImage {
            data,
            width: trimmed.width(),
            height: trimmed.height(),
            origin_x,
            origin_y,
        })
    }

    /// GPS position from EXIF, if recorded. Input that is not an image is a
    /// decode error; missing or malformed GPS fields are `Ok(None)`.
    pub fn gps_coordinates<R: BufRead + Seek>(&self, mut input: R) -> Result<Option<GpsCoordinate>> {
        let start = input.stream_position()?;
        self.loader.probe(&mut input)?;
        input.seek(SeekFrom::Start(start))?;

        Ok(self.metadata_processor.gps_coordinates(&mut input))
    }

    pub fn dimensions<R: BufRead + Seek>(&self, input: R) -> Result<Dimensions> {
        Ok(self.loader.probe(input)?)
    }

    /// Apply the upload size policy from [`ProcessConfig`].
    pub fn validate_upload<R: BufRead + Seek>(
        &self,
        input: R,
        content_type: &str,
        byte_len: u64,
    ) -> Result<Dimensions> {
        self.validator
            .validate(&self.loader, input, content_type, byte_len)
    }
}

impl Default for PhotoProcessor {
    fn default() -> Self {
        Self::new(ProcessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CropRegion, DecodeError, SliceLine};
    use crate::utils::fixtures;
    use image::Rgba;
    use std::io::Cursor;

    fn processor() -> PhotoProcessor {
        PhotoProcessor::new(ProcessConfig {
            optimize_png: false,
            ..Default::default()
        })
    }

    #[test]
    fn processor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PhotoProcessor>();
    }

    #[test]
    fn square_upload_round_trips_size() {
        let jpeg = fixtures::jpeg_bytes(&fixtures::gradient_rgb(120, 80));
        let bytes = processor()
            .process_single(Cursor::new(&jpeg), &ProcessOptions::square(false))
            .unwrap();

        let dims = processor().dimensions(Cursor::new(&bytes)).unwrap();
        assert_eq!(dims, Dimensions { width: 80, height: 80 });
    }

    #[test]
    fn plain_reencode_keeps_size() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(33, 47));
        let bytes = processor()
            .process_single(Cursor::new(&png), &ProcessOptions::default())
            .unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
        let dims = processor().dimensions(Cursor::new(&bytes)).unwrap();
        assert_eq!(dims, Dimensions { width: 33, height: 47 });
    }

    #[test]
    fn square_then_crop_then_slice() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(100, 60));
        let options = ProcessOptions::square(true)
            .with_crop(CropRegion::new(10, 10, 40, 30))
            .with_slices(vec![SliceLine::vertical(15), SliceLine::horizontal(20)]);

        let pieces = processor().process(Cursor::new(&png), &options).unwrap();
        let layout: Vec<_> = pieces
            .iter()
            .map(|p| (p.origin_x, p.origin_y, p.width, p.height))
            .collect();

        assert_eq!(
            layout,
            vec![(0, 0, 15, 20), (0, 20, 15, 10), (15, 0, 25, 20), (15, 20, 25, 10)]
        );
    }

    #[test]
    fn crop_out_of_bounds_is_reported() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(100, 100));
        let options = ProcessOptions::default().with_crop(CropRegion::new(10, 10, 9999, 9999));

        let err = processor().process(Cursor::new(&png), &options).unwrap_err();
        assert!(err.is_invalid_crop());
    }

    #[test]
    fn process_single_refuses_slices() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(10, 10));
        let options = ProcessOptions::default().with_slices(vec![SliceLine::vertical(5)]);

        assert!(matches!(
            processor().process_single(Cursor::new(&png), &options),
            Err(ImageToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn thumbnail_fits_box() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(300, 100));
        let bytes = processor()
            .thumbnail(Cursor::new(&png), 60, 60, true)
            .unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
        let dims = processor().dimensions(Cursor::new(&bytes)).unwrap();
        assert_eq!(dims, Dimensions { width: 60, height: 20 });
    }

    #[test]
    fn thumbnail_beyond_size_limit_is_an_error() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(10, 10));

        let err = processor()
            .thumbnail(Cursor::new(&png), u32::MAX, u32::MAX, false)
            .unwrap_err();
        assert!(matches!(err, ImageToolError::InvalidParameter(_)));

        let small_limit = PhotoProcessor::new(ProcessConfig {
            max_dimensions: Some((64, 64)),
            ..Default::default()
        });
        assert!(small_limit
            .thumbnail(Cursor::new(&png), 65, 65, false)
            .is_err());
        assert!(small_limit
            .thumbnail(Cursor::new(&png), 64, 64, false)
            .is_ok());
    }

    #[test]
    fn image_wider_than_jpeg_limit_is_rejected_at_decode() {
        let png = fixtures::png_bytes(&fixtures::gradient_rgba(MAX_ENCODED_SIDE + 1, 1));

        let err = processor()
            .process_single(Cursor::new(&png), &ProcessOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ImageToolError::Decode(DecodeError::LimitExceeded(_))
        ));
    }

    #[test]
    fn trim_reports_origin_and_is_idempotent() {
        let white = Rgba([255, 255, 255, 255]);
        let blue = Rgba([0, 0, 255, 255]);
        let png = fixtures::png_bytes(&fixtures::framed(64, 48, white, blue, (9, 4, 20, 30)));

        let first = processor().trim(Cursor::new(&png), true).unwrap();
        assert_eq!(
            (first.origin_x, first.origin_y, first.width, first.height),
            (9, 4, 20, 30)
        );

        let second = processor().trim(Cursor::new(&first.data), true).unwrap();
        assert_eq!((second.origin_x, second.origin_y), (0, 0));
        assert_eq!((second.width, second.height), (20, 30));
    }

    #[test]
    fn gps_from_stream_and_absent_gps() {
        let jpeg = fixtures::jpeg_with_gps(
            Some([40, 26, 46]),
            Some("N"),
            Some([79, 58, 56]),
            Some("W"),
        );
        let coordinate = processor()
            .gps_coordinates(Cursor::new(&jpeg))
            .unwrap()
            .unwrap();
        assert!((coordinate.latitude - 40.446111).abs() < 1e-6);
        assert!((coordinate.longitude + 79.982222).abs() < 1e-6);

        let plain = fixtures::jpeg_bytes(&fixtures::gradient_rgb(8, 8));
        assert_eq!(processor().gps_coordinates(Cursor::new(&plain)).unwrap(), None);
    }

    #[test]
    fn every_entry_point_rejects_text() {
        let text: &[u8] = b"Lorem ipsum dolor sit amet";
        let p = processor();

        assert!(p
            .process(Cursor::new(text), &ProcessOptions::default())
            .unwrap_err()
            .is_decode_error());
        assert!(p
            .process_single(Cursor::new(text), &ProcessOptions::square(true))
            .unwrap_err()
            .is_decode_error());
        assert!(p.thumbnail(Cursor::new(text), 10, 10, false).unwrap_err().is_decode_error());
        assert!(p.trim(Cursor::new(text), false).unwrap_err().is_decode_error());
        assert!(p.gps_coordinates(Cursor::new(text)).unwrap_err().is_decode_error());
        assert!(p.dimensions(Cursor::new(text)).unwrap_err().is_decode_error());
    }
}
