// photoproc/src/processors/metadata.rs
use crate::core::GpsCoordinate;
use exif::{Exif, Field, In, Reader, Tag, Value};
use std::io::{BufRead, Seek};

/// Reasons a GPS record could not be used. Never surfaced as a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedMetadata {
    MissingField(Tag),
    NotRational(Tag),
    TooFewComponents(Tag, usize),
    ZeroDenominator(Tag),
    BadReference(Tag),
}

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Read the EXIF container, treating a missing or unreadable one as absent.
    pub fn read_metadata<R: BufRead + Seek>(&self, input: &mut R) -> Option<Exif> {
        match Reader::new().read_from_container(input) {
            Ok(exif) => {
                log::debug!("Found EXIF data with {} fields", exif.fields().count());
                Some(exif)
            }
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found");
                None
            }
            Err(e) => {
                log::warn!("Failed to read EXIF data, ignoring it: {}", e);
                None
            }
        }
    }

    pub fn gps_coordinates<R: BufRead + Seek>(&self, input: &mut R) -> Option<GpsCoordinate> {
        let exif = self.read_metadata(input)?;

        match self.extract_gps_coordinates(&exif) {
            Ok(coordinate) => Some(coordinate),
            Err(MalformedMetadata::MissingField(tag)) => {
                log::debug!("No GPS position recorded ({} missing)", tag);
                None
            }
            Err(reason) => {
                log::warn!("Ignoring malformed GPS metadata: {:?}", reason);
                None
            }
        }
    }

    /// All four of latitude, its reference, longitude and its reference must
    /// be present and well-formed.
    pub fn extract_gps_coordinates(
        &self,
        exif: &Exif,
    ) -> Result<GpsCoordinate, MalformedMetadata> {
        let lat = field(exif, Tag::GPSLatitude)?;
        let lat_ref = field(exif, Tag::GPSLatitudeRef)?;
        let lon = field(exif, Tag::GPSLongitude)?;
        let lon_ref = field(exif, Tag::GPSLongitudeRef)?;

        let latitude = self.degrees_to_decimal(lat, lat_ref, b'S')?;
        let longitude = self.degrees_to_decimal(lon, lon_ref, b'W')?;

        Ok(GpsCoordinate {
            latitude,
            longitude,
        })
    }

    fn degrees_to_decimal(
        &self,
        degrees: &Field,
        ref_field: &Field,
        negative_ref: u8,
    ) -> Result<f64, MalformedMetadata> {
        let components = match degrees.value {
            Value::Rational(ref v) => v,
            _ => return Err(MalformedMetadata::NotRational(degrees.tag)),
        };
        if components.len() < 3 {
            return Err(MalformedMetadata::TooFewComponents(
                degrees.tag,
                components.len(),
            ));
        }
        if components[..3].iter().any(|r| r.denom == 0) {
            return Err(MalformedMetadata::ZeroDenominator(degrees.tag));
        }

        let reference = match ref_field.value {
            Value::Ascii(ref v) => v.first().and_then(|s| s.first()).copied(),
            _ => None,
        }
        .ok_or(MalformedMetadata::BadReference(ref_field.tag))?;

        Ok(dms_to_decimal(
            components[0].to_f64(),
            components[1].to_f64(),
            components[2].to_f64(),
            reference == negative_ref,
        ))
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn field(exif: &Exif, tag: Tag) -> Result<&Field, MalformedMetadata> {
    exif.get_field(tag, In::PRIMARY)
        .ok_or(MalformedMetadata::MissingField(tag))
}

/// Degrees/minutes/seconds to signed decimal degrees.
///
/// Callers pass `negative` only for an exact uppercase `S` or `W` reference.
///
/// Minutes and seconds are combined into a fraction of a degree first
/// (`(m * 60 + s) / 3600`); the sign is applied once at the end.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, negative: bool) -> f64 {
    let magnitude = degrees + (minutes * 60.0 + seconds) / 3600.0;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
