//! EXIF normalization
//!
//! Turns a raw EXIF tag map into the canonical `exif` record. The pipeline is
//! a fixed sequence of stages over one working map; order matters, later
//! stages rely on the value shapes earlier stages produce (e.g. coordinate
//! fusion needs the rational arrays already converted to floats).
//!
//! Field-level conversion failures never abort the record; the affected field
//! keeps its previous value or is dropped, per field.

use crate::convert;
use crate::decode;
use crate::error::{ExtractError, Result};
use crate::exif_spec;
use crate::manager::Extractor;
use crate::resource::Resource;
use crate::value::{CanonicalRecord, MetaDataCollection, MetaValue, RawTagMap};
use encoding_rs::EUC_JP;

/// Tags renamed between EXIF revisions plus numeric placeholders some
/// decoders emit for tags they predate.
const DEPRECATED_OR_UNMAPPED: &[(&str, &str)] = &[
    ("GPSVersion", "GPSVersionID"),
    ("ISOSpeedRatings", "PhotographicSensitivity"),
    ("UndefinedTag:0x8830", "SensitivityType"),
    ("UndefinedTag:0x8832", "RecommendedExposureIndex"),
    ("UndefinedTag:0x9010", "OffsetTime"),
    ("UndefinedTag:0x9011", "OffsetTimeOriginal"),
    ("UndefinedTag:0x9012", "OffsetTimeDigitized"),
    ("UndefinedTag:0x9400", "Temperature"),
    ("UndefinedTag:0x9401", "Humidity"),
    ("UndefinedTag:0x9402", "Pressure"),
    ("UndefinedTag:0x9403", "WaterDepth"),
    ("UndefinedTag:0x9404", "Acceleration"),
    ("UndefinedTag:0x9405", "CameraElevationAngle"),
    ("UndefinedTag:0xA430", "CameraOwnerName"),
    ("UndefinedTag:0xA431", "BodySerialNumber"),
    ("UndefinedTag:0xA432", "LensSpecification"),
    ("UndefinedTag:0xA433", "LensMake"),
    ("UndefinedTag:0xA434", "LensModel"),
    ("UndefinedTag:0xA435", "LensSerialNumber"),
    ("UndefinedTag:0xA500", "Gamma"),
];

/// Fields whose raw value is a single rational string.
const RATIONAL_FIELDS: &[&str] = &[
    "Acceleration",
    "ApertureValue",
    "BrightnessValue",
    "CameraElevationAngle",
    "CompressedBitsPerPixel",
    "DigitalZoomRatio",
    "ExposureBiasValue",
    "ExposureIndex",
    "ExposureTime",
    "FlashEnergy",
    "FNumber",
    "FocalLength",
    "FocalPlaneXResolution",
    "FocalPlaneYResolution",
    "GainControl",
    "Gamma",
    "GPSAltitude",
    "GPSDestBearing",
    "GPSDestDistance",
    "GPSDOP",
    "GPSHPositioningError",
    "GPSImgDirection",
    "GPSSpeed",
    "GPSTrack",
    "Humidity",
    "MaxApertureValue",
    "Pressure",
    "ShutterSpeedValue",
    "SubjectDistance",
    "Temperature",
    "WaterDepth",
    "XResolution",
    "YResolution",
];

/// Fields whose raw value is an array of rationals.
const RATIONAL_ARRAY_FIELDS: &[&str] = &[
    "GPSDestLatitude",
    "GPSDestLongitude",
    "GPSLatitude",
    "GPSLongitude",
    "GPSTimeStamp",
    "LensSpecification",
    "PrimaryChromaticities",
    "ReferenceBlackWhite",
    "WhitePoint",
    "YCbCrCoefficients",
];

/// Coordinate fields fused with their cardinal reference companion.
const GPS_COORDINATE_FIELDS: &[&str] = &[
    "GPSDestLatitude",
    "GPSDestLongitude",
    "GPSLatitude",
    "GPSLongitude",
];

/// Sub-second companion field to timestamp field.
const SUB_SECOND_FIELDS: &[(&str, &str)] = &[
    ("SubSecTime", "DateTime"),
    ("SubSecTimeDigitized", "DateTimeDigitized"),
    ("SubSecTimeOriginal", "DateTimeOriginal"),
];

/// UTC-offset companion field to timestamp field.
const TIME_OFFSET_FIELDS: &[(&str, &str)] = &[
    ("OffsetTime", "DateTime"),
    ("OffsetTimeDigitized", "DateTimeDigitized"),
    ("OffsetTimeOriginal", "DateTimeOriginal"),
];

/// Extracts EXIF metadata per CIPA DC-008 (EXIF 2.31).
#[derive(Debug, Default)]
pub struct ExifExtractor;

impl ExifExtractor {
    pub const COMPATIBLE_MEDIA_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/tiff", "video/jpeg"];

    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ExifExtractor {
    fn name(&self) -> &'static str {
        "EXIF"
    }

    fn compatible_media_types(&self) -> &'static [&'static str] {
        Self::COMPATIBLE_MEDIA_TYPES
    }

    /// Reads the raw tag map out of the resource and stores the normalized
    /// record under the `exif` domain key.
    fn extract(&self, resource: &Resource, collection: &mut MetaDataCollection) -> Result<()> {
        let bytes = resource.bytes()?;
        let raw = decode::read_exif_tags(&bytes).ok_or_else(|| ExtractError::NoData {
            identifier: resource.identifier().to_string(),
            kind: "EXIF",
        })?;

        collection.set("exif", normalize(&raw));
        Ok(())
    }
}

/// Normalizes a raw EXIF tag map into the canonical record.
///
/// Pure function of the input map and the static specification tables; the
/// raw map is never mutated.
pub fn normalize(raw: &RawTagMap) -> CanonicalRecord {
    let mut data = raw.clone();

    remap_deprecated(&mut data);
    convert_rationals(&mut data);
    convert_rational_arrays(&mut data);
    collapse_sensitivity(&mut data);
    convert_gps_version(&mut data);
    apply_altitude_reference(&mut data);
    fuse_gps_coordinates(&mut data);
    fuse_gps_timestamp(&mut data);
    interpret_values(&mut data);
    fuse_sub_seconds(&mut data);
    fuse_time_offsets(&mut data);
    recode_user_comment(&mut data);

    data.into_iter().collect()
}

fn remap_deprecated(data: &mut RawTagMap) {
    for (old_name, new_name) in DEPRECATED_OR_UNMAPPED {
        if let Some(value) = data.remove(*old_name) {
            data.insert((*new_name).to_string(), value);
        }
    }
}

fn convert_rationals(data: &mut RawTagMap) {
    for field in RATIONAL_FIELDS {
        let converted = match data.get(*field) {
            Some(MetaValue::Text(rational)) => convert::rational_to_float(rational),
            _ => continue,
        };
        data.insert((*field).to_string(), MetaValue::Float(converted));
    }
}

fn convert_rational_arrays(data: &mut RawTagMap) {
    for field in RATIONAL_ARRAY_FIELDS {
        let converted = match data.get(*field) {
            Some(MetaValue::List(items)) => MetaValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        MetaValue::Text(rational) => {
                            MetaValue::Float(convert::rational_to_float(rational))
                        }
                        other => other.clone(),
                    })
                    .collect(),
            ),
            // although defined as an array, some writers emit one rational
            Some(MetaValue::Text(rational)) => {
                MetaValue::Float(convert::rational_to_float(rational))
            }
            _ => continue,
        };
        data.insert((*field).to_string(), converted);
    }
}

fn collapse_sensitivity(data: &mut RawTagMap) {
    let first = match data.get("PhotographicSensitivity") {
        Some(MetaValue::List(items)) => items.first().and_then(MetaValue::as_i64).unwrap_or(0),
        _ => return,
    };
    data.insert(
        "PhotographicSensitivity".to_string(),
        MetaValue::Integer(first),
    );
}

fn convert_gps_version(data: &mut RawTagMap) {
    let version = match data.get("GPSVersionID") {
        Some(MetaValue::Bytes(bytes)) => convert::binary_to_version(bytes),
        _ => return,
    };
    data.insert("GPSVersionID".to_string(), MetaValue::Text(version));
}

fn apply_altitude_reference(data: &mut RawTagMap) {
    if !data.contains_key("GPSAltitude") {
        return;
    }
    let Some(reference) = data.remove("GPSAltitudeRef") else {
        return;
    };
    // reference value 1 means "below sea level"
    if reference.as_i64() == Some(1) {
        let altitude = data.get("GPSAltitude").and_then(MetaValue::as_f64);
        if let Some(altitude) = altitude {
            data.insert("GPSAltitude".to_string(), MetaValue::Float(-altitude));
        }
    }
}

fn fuse_gps_coordinates(data: &mut RawTagMap) {
    for field in GPS_COORDINATE_FIELDS {
        let dms = match data.get(*field) {
            Some(value) => float_components(value),
            None => continue,
        };
        let reference_key = format!("{field}Ref");
        let reference = data.remove(&reference_key);
        let decimal = convert::dms_to_decimal_degrees(
            &dms,
            reference.as_ref().and_then(MetaValue::as_str),
        );
        data.insert((*field).to_string(), MetaValue::Float(decimal));
    }
}

fn fuse_gps_timestamp(data: &mut RawTagMap) {
    if !(data.contains_key("GPSTimeStamp") && data.contains_key("GPSDateStamp")) {
        return;
    }
    let time = data.remove("GPSTimeStamp").map(|v| float_components(&v));
    let date = data.remove("GPSDateStamp");

    if let (Some(time), Some(MetaValue::Text(date))) = (time, date) {
        if let Some(timestamp) = convert::combine_gps_date_and_time(&date, &time) {
            data.insert(
                "GPSDateTimeStamp".to_string(),
                MetaValue::DateTime(timestamp),
            );
        }
    }
}

fn float_components(value: &MetaValue) -> Vec<f64> {
    match value {
        MetaValue::List(items) => items
            .iter()
            .map(|item| item.as_f64().unwrap_or(0.0))
            .collect(),
        scalar => vec![scalar.as_f64().unwrap_or(0.0)],
    }
}

fn interpret_values(data: &mut RawTagMap) {
    let fields: Vec<String> = data.keys().cloned().collect();
    for field in fields {
        if let Some(value) = data.remove(&field) {
            let interpreted = exif_spec::interpret_value(&field, value);
            data.insert(field, interpreted);
        }
    }
}

fn fuse_sub_seconds(data: &mut RawTagMap) {
    for (sub_second_field, timestamp_field) in SUB_SECOND_FIELDS {
        if !(data.contains_key(*sub_second_field) && data.contains_key(*timestamp_field)) {
            continue;
        }
        let Some(sub_seconds) = data.remove(*sub_second_field) else {
            continue;
        };
        let digits = match &sub_seconds {
            MetaValue::Text(digits) => digits.clone(),
            MetaValue::Integer(number) => number.to_string(),
            _ => continue,
        };
        let timestamp = match data.get(*timestamp_field) {
            Some(MetaValue::DateTime(timestamp)) => *timestamp,
            _ => continue,
        };
        if let Some(fused) = convert::fuse_subseconds(timestamp, &digits) {
            data.insert((*timestamp_field).to_string(), MetaValue::DateTime(fused));
        }
    }
}

fn fuse_time_offsets(data: &mut RawTagMap) {
    for (offset_field, timestamp_field) in TIME_OFFSET_FIELDS {
        if !(data.contains_key(*offset_field) && data.contains_key(*timestamp_field)) {
            continue;
        }
        let Some(offset) = data.remove(*offset_field) else {
            continue;
        };
        let Some(offset) = offset.as_str() else {
            continue;
        };
        let timestamp = match data.get(*timestamp_field) {
            Some(MetaValue::DateTime(timestamp)) => *timestamp,
            _ => continue,
        };
        if let Some(fused) = convert::fuse_utc_offset(timestamp, offset) {
            data.insert(
                (*timestamp_field).to_string(),
                MetaValue::DateTimeTz(fused),
            );
        }
    }
}

// Character-code markers of the UserComment field, eight bytes each.
const USER_COMMENT_ASCII: &[u8; 8] = b"ASCII\0\0\0";
const USER_COMMENT_JIS: &[u8; 8] = b"JIS\0\0\0\0\0";
const USER_COMMENT_UNICODE: &[u8; 8] = b"UNICODE\0";

/// Re-encodes the UserComment payload according to its character-code
/// marker. A comment that fails validation against its declared encoding is
/// dropped entirely; malformed text must not reach downstream storage.
fn recode_user_comment(data: &mut RawTagMap) {
    let Some(comment) = data.remove("UserComment") else {
        return;
    };
    let Some(bytes) = comment.as_bytes() else {
        return;
    };

    let decoded = if bytes.len() >= 8 {
        let (marker, payload) = bytes.split_at(8);
        match marker {
            m if m == USER_COMMENT_ASCII => payload
                .is_ascii()
                .then(|| String::from_utf8_lossy(payload).into_owned()),
            m if m == USER_COMMENT_JIS => {
                let (text, _, had_errors) = EUC_JP.decode(payload);
                (!had_errors).then(|| text.into_owned())
            }
            m if m == USER_COMMENT_UNICODE => std::str::from_utf8(payload)
                .ok()
                .map(str::to_string),
            // Undefined or unrecognized marker: try ASCII on the whole value
            _ => bytes
                .is_ascii()
                .then(|| String::from_utf8_lossy(bytes).into_owned()),
        }
    } else {
        bytes
            .is_ascii()
            .then(|| String::from_utf8_lossy(bytes).into_owned())
    };

    if let Some(text) = decoded {
        data.insert("UserComment".to_string(), MetaValue::Text(text));
    }
}
