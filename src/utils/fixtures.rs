// photoproc/src/utils/fixtures.rs
//! In-memory test images.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;

pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    })
}

/// Gradient whose alpha varies, so lossless encoders cannot drop the channel.
pub fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            64,
            ((x + y) * 7 % 256) as u8,
        ])
    })
}

/// A `width` x `height` canvas filled with `border`, with a solid `content`
/// rectangle at `(x, y)`.
pub fn framed(
    width: u32,
    height: u32,
    border: Rgba<u8>,
    content: Rgba<u8>,
    rect: (i32, i32, u32, u32),
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, border);
    let (x, y, w, h) = rect;
    draw_filled_rect_mut(&mut canvas, Rect::at(x, y).of_size(w, h), content);
    canvas
}

pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_with_encoder(PngEncoder::new(&mut buffer))
        .unwrap();
    buffer
}

pub fn jpeg_bytes(image: &RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, 90))
        .unwrap();
    buffer
}

fn rationals(values: [u32; 3]) -> Value {
    Value::Rational(values.iter().map(|&v| Rational { num: v, denom: 1 }).collect())
}

fn ascii(value: &str) -> Value {
    Value::Ascii(vec![value.as_bytes().to_vec()])
}

/// Build a JPEG carrying an EXIF APP1 segment with the given GPS fields.
/// `None` leaves that field out.
pub fn jpeg_with_gps(
    latitude: Option<[u32; 3]>,
    latitude_ref: Option<&str>,
    longitude: Option<[u32; 3]>,
    longitude_ref: Option<&str>,
) -> Vec<u8> {
    let mut fields = vec![Field {
        tag: Tag::Software,
        ifd_num: In::PRIMARY,
        value: ascii("photoproc-tests"),
    }];

    let gps = [
        (Tag::GPSLatitudeRef, latitude_ref.map(ascii)),
        (Tag::GPSLatitude, latitude.map(rationals)),
        (Tag::GPSLongitudeRef, longitude_ref.map(ascii)),
        (Tag::GPSLongitude, longitude.map(rationals)),
    ];
    for (tag, value) in gps {
        if let Some(value) = value {
            fields.push(Field {
                tag,
                ifd_num: In::PRIMARY,
                value,
            });
        }
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    splice_app1(&jpeg_bytes(&gradient_rgb(16, 16)), &tiff)
}

fn splice_app1(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    let payload_len = 2 + 6 + tiff.len();
    let mut out = Vec::with_capacity(jpeg.len() + payload_len + 2);

    // SOI, then APP1 "Exif\0\0" ahead of the encoder's own segments.
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&(payload_len as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}
