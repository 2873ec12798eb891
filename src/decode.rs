//! Low-level decoder adapters
//!
//! The normalizers never touch IFD or APP13 wire structures themselves; this
//! module adapts the external decoders into the raw tag maps they consume:
//!
//! - EXIF: `kamadak-exif` parses the IFD tree, we map tag numbers to
//!   canonical names and wire types to [`MetaValue`]s (rationals stay in
//!   their `"num/den"` string encoding for the converter stage).
//! - IPTC: the APP13 segment is located in the JPEG marker stream, the
//!   Photoshop 8BIM resource 0x0404 is unwrapped, and the contained IIM
//!   datasets are split into (record#dataset, bytes) occurrences.

use crate::exif_spec;
use crate::iim_spec::DataSet;
use crate::value::{MetaValue, RawTagMap};
use exif::{Context, In, Value};
use std::io::Cursor;

// ============================================================================
// EXIF: kamadak-exif adapter
// ============================================================================

/// Reads the primary-image EXIF tags out of a JPEG/TIFF byte buffer.
///
/// Returns `None` when the buffer holds no parsable EXIF block. Thumbnail
/// IFD fields are skipped.
pub fn read_exif_tags(bytes: &[u8]) -> Option<RawTagMap> {
    let exif_data = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let mut tags = RawTagMap::new();
    for field in exif_data.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let Some(name) = field_name(field.tag) else {
            continue;
        };
        if let Some(value) = wire_value(&name, &field.value) {
            tags.insert(name, value);
        }
    }

    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

/// Canonical name for a decoded tag; unknown tag numbers keep their numeric
/// placeholder so the deprecated-tag remap stage can pick them up.
fn field_name(tag: exif::Tag) -> Option<String> {
    let number = tag.number();
    match tag.context() {
        Context::Tiff | Context::Exif => Some(
            exif_spec::ifd_tag_name(number)
                .map(str::to_string)
                .unwrap_or_else(|| format!("UndefinedTag:0x{number:04X}")),
        ),
        Context::Gps => Some(
            exif_spec::gps_tag_name(number)
                .map(str::to_string)
                .unwrap_or_else(|| format!("UndefinedTag:0x{number:04X}")),
        ),
        _ => None,
    }
}

fn wire_value(name: &str, value: &Value) -> Option<MetaValue> {
    match value {
        Value::Byte(items) => match items.as_slice() {
            [] => None,
            [single] => Some(MetaValue::Integer(*single as i64)),
            // multi-byte payloads like GPSVersionID stay binary
            _ => Some(MetaValue::Bytes(items.clone())),
        },
        Value::Ascii(chunks) => {
            let mut text = String::new();
            for chunk in chunks {
                text.push_str(&String::from_utf8_lossy(chunk));
            }
            Some(MetaValue::Text(text.trim_end_matches('\0').to_string()))
        }
        Value::Short(items) => integers(items.iter().map(|v| *v as i64)),
        Value::Long(items) => integers(items.iter().map(|v| *v as i64)),
        Value::SShort(items) => integers(items.iter().map(|v| *v as i64)),
        Value::SLong(items) => integers(items.iter().map(|v| *v as i64)),
        Value::Rational(items) => rationals(items.iter().map(|r| format!("{}/{}", r.num, r.denom))),
        Value::SRational(items) => {
            rationals(items.iter().map(|r| format!("{}/{}", r.num, r.denom)))
        }
        Value::Float(items) => match items.as_slice() {
            [] => None,
            [single] => Some(MetaValue::Float(*single as f64)),
            _ => Some(MetaValue::List(
                items.iter().map(|v| MetaValue::Float(*v as f64)).collect(),
            )),
        },
        Value::Double(items) => match items.as_slice() {
            [] => None,
            [single] => Some(MetaValue::Float(*single)),
            _ => Some(MetaValue::List(
                items.iter().map(|v| MetaValue::Float(*v)).collect(),
            )),
        },
        Value::Undefined(bytes, _) => undefined_value(name, bytes),
        _ => None,
    }
}

fn integers(items: impl Iterator<Item = i64>) -> Option<MetaValue> {
    let values: Vec<i64> = items.collect();
    match values.as_slice() {
        [] => None,
        [single] => Some(MetaValue::Integer(*single)),
        _ => Some(MetaValue::List(
            values.into_iter().map(MetaValue::Integer).collect(),
        )),
    }
}

fn rationals(items: impl Iterator<Item = String>) -> Option<MetaValue> {
    let values: Vec<String> = items.collect();
    match values.len() {
        0 => None,
        1 => Some(MetaValue::Text(values.into_iter().next()?)),
        _ => Some(MetaValue::List(
            values.into_iter().map(MetaValue::Text).collect(),
        )),
    }
}

/// UNDEFINED-typed payloads are interpreted per tag: version tags are ASCII,
/// one-byte enumerations are integers, everything else stays binary for the
/// later pipeline stages (UserComment keeps its character-code header).
fn undefined_value(name: &str, bytes: &[u8]) -> Option<MetaValue> {
    match name {
        "ExifVersion" | "FlashpixVersion" => {
            Some(MetaValue::Text(String::from_utf8_lossy(bytes).into_owned()))
        }
        "SceneType" | "FileSource" => bytes.first().map(|b| MetaValue::Integer(*b as i64)),
        _ => Some(MetaValue::Bytes(bytes.to_vec())),
    }
}

// ============================================================================
// IPTC: APP13 / Photoshop 8BIM / IIM dataset splitting
// ============================================================================

const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";
const BIM_MARKER: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

/// Reads the IIM dataset occurrences out of a JPEG's APP13 segment.
///
/// Returns `None` when there is no APP13 segment or no IPTC resource in it.
pub fn read_iim_datasets(bytes: &[u8]) -> Option<Vec<(DataSet, Vec<u8>)>> {
    let iptc_bytes = find_jpeg_app13_iptc(bytes)?;
    let datasets = split_iim_datasets(iptc_bytes);
    if datasets.is_empty() {
        None
    } else {
        Some(datasets)
    }
}

/// Splits raw IIM bytes into dataset occurrences.
///
/// Each dataset is framed as: 0x1C marker, record number, dataset number,
/// big-endian u16 length, payload.
pub fn split_iim_datasets(data: &[u8]) -> Vec<(DataSet, Vec<u8>)> {
    let mut datasets = Vec::new();
    let mut pos = 0;

    while pos + 5 <= data.len() {
        if data[pos] != 0x1C {
            pos += 1;
            continue;
        }

        let record = data[pos + 1];
        let number = data[pos + 2];
        let length = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as usize;
        pos += 5;

        if pos + length > data.len() {
            break;
        }

        datasets.push((DataSet(record, number), data[pos..pos + length].to_vec()));
        pos += length;
    }

    datasets
}

/// Finds the raw IPTC-IIM bytes inside a JPEG's APP13 segment (0xFF 0xED).
fn find_jpeg_app13_iptc(data: &[u8]) -> Option<&[u8]> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];

        // SOS means entropy-coded image data follows; no more metadata
        if marker == 0xDA || marker == 0xD9 {
            return None;
        }
        // standalone markers without a length field
        if (0xD0..=0xD8).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 || pos + 2 + length > data.len() {
            return None;
        }
        let segment = &data[pos + 4..pos + 2 + length];

        if marker == 0xED {
            if let Some(iptc) = extract_iptc_from_8bim(segment) {
                return Some(iptc);
            }
        }

        pos += 2 + length;
    }

    None
}

/// Walks the Photoshop 8BIM resource blocks of an APP13 segment and returns
/// the payload of resource 0x0404 (IPTC-NAA).
fn extract_iptc_from_8bim(segment: &[u8]) -> Option<&[u8]> {
    let data = segment.strip_prefix(PHOTOSHOP_HEADER).unwrap_or(segment);

    let mut pos = 0;
    while pos + 12 <= data.len() {
        // resource: "8BIM" + id (2) + pascal name (padded to even) + len (4) + payload
        if &data[pos..pos + 4] != BIM_MARKER {
            pos += 1;
            continue;
        }
        pos += 4;

        if pos + 2 > data.len() {
            break;
        }
        let resource_id = u16::from_be_bytes([data[pos], data[pos + 1]]);
        pos += 2;

        if pos >= data.len() {
            break;
        }
        let name_len = data[pos] as usize;
        pos += 1 + name_len + (1 + name_len) % 2;

        if pos + 4 > data.len() {
            break;
        }
        let payload_len =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        pos += 4;

        if pos + payload_len > data.len() {
            break;
        }
        if resource_id == IPTC_RESOURCE_ID {
            return Some(&data[pos..pos + payload_len]);
        }

        pos += payload_len + payload_len % 2;
    }

    None
}
