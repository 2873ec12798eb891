//! Converters for raw EXIF/IPTC value encodings
//!
//! EXIF stores non-integer measurements as rational strings, GPS coordinates
//! as degree/minute/second triples and timestamps split over several fields.
//! These functions turn those encodings into plain floats and chrono values.
//! Conversion never panics; a malformed input yields the documented fallback.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

/// Converts a rational string like EXIF RATIONAL (`"24/1"`, `"-24/10"`) into
/// a float.
///
/// Returns `0.0` when the input does not match `^-?\d+/\d+$` or when the
/// denominator is zero.
pub fn rational_to_float(rational: &str) -> f64 {
    let Some((numerator, denominator)) = rational.split_once('/') else {
        return 0.0;
    };

    let unsigned = numerator.strip_prefix('-').unwrap_or(numerator);
    if unsigned.is_empty()
        || !unsigned.bytes().all(|b| b.is_ascii_digit())
        || denominator.is_empty()
        || !denominator.bytes().all(|b| b.is_ascii_digit())
    {
        return 0.0;
    }

    let (Ok(numerator), Ok(denominator)) = (numerator.parse::<i64>(), denominator.parse::<u64>())
    else {
        return 0.0;
    };
    if denominator == 0 {
        return 0.0;
    }

    numerator as f64 / denominator as f64
}

/// Renders packed binary version bytes as a dotted decimal string,
/// e.g. `[2, 2, 0, 0]` becomes `"2.2.0.0"`.
pub fn binary_to_version(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Converts coordinates in DMS (degrees, minutes, seconds) plus the cardinal
/// direction reference into DD (decimal degrees) notation.
///
/// Missing components default to `0.0`. A reference of `S` or `W` flips the
/// sign; a missing reference counts as positive. The result is rounded to six
/// decimal places.
pub fn dms_to_decimal_degrees(dms: &[f64], cardinal_reference: Option<&str>) -> f64 {
    let degrees = dms.first().copied().unwrap_or(0.0);
    let minutes = dms.get(1).copied().unwrap_or(0.0);
    let seconds = dms.get(2).copied().unwrap_or(0.0);

    let flip = match cardinal_reference {
        Some("S") | Some("W") => -1.0,
        _ => 1.0,
    };

    round6(flip * (degrees + minutes / 60.0 + seconds / 3600.0))
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Combines the EXIF `GPSDateStamp` (`"YYYY:MM:DD"`) and `GPSTimeStamp`
/// (three rationals, already converted to floats) into one timestamp.
///
/// Time components are truncated to whole seconds. Returns `None` when the
/// combined stamp does not parse.
pub fn combine_gps_date_and_time(date_stamp: &str, time_stamp: &[f64]) -> Option<NaiveDateTime> {
    let hours = time_stamp.first().copied().unwrap_or(0.0) as i64;
    let minutes = time_stamp.get(1).copied().unwrap_or(0.0) as i64;
    let seconds = time_stamp.get(2).copied().unwrap_or(0.0) as i64;

    let combined = format!("{date_stamp} {hours:02}:{minutes:02}:{seconds:02}");
    NaiveDateTime::parse_from_str(&combined, "%Y:%m:%d %H:%M:%S").ok()
}

/// Combines ISO 8601-like IIM date (`"YYYYMMDD"`) and time
/// (`"HHMMSS"` with optional `±HHMM` offset) strings into one timestamp.
///
/// An empty time string counts as midnight UTC; a time without an explicit
/// offset marker counts as UTC.
pub fn combine_iso8601(date_string: &str, time_string: &str) -> Option<DateTime<FixedOffset>> {
    let time = if time_string.is_empty() {
        "000000+0000".to_string()
    } else if !time_string.contains('+') && !time_string.contains('-') {
        format!("{time_string}+0000")
    } else {
        time_string.to_string()
    };

    DateTime::parse_from_str(&format!("{date_string}{time}"), "%Y%m%d%H%M%S%z").ok()
}

/// Fuses a companion sub-second field into a whole-second timestamp.
///
/// The digit string is the fractional part of a second per the EXIF
/// `SubSecTime` definition. Returns `None` for non-digit input.
pub fn fuse_subseconds(timestamp: NaiveDateTime, digits: &str) -> Option<NaiveDateTime> {
    let digits = digits.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // "123" means 0.123s; pad or truncate to nanosecond precision
    let mut padded = digits.to_string();
    padded.truncate(9);
    while padded.len() < 9 {
        padded.push('0');
    }
    let nanos: u32 = padded.parse().ok()?;

    timestamp.with_nanosecond(nanos)
}

/// Parses a textual UTC offset (`"+02:00"` or `"+0200"`) into a fixed offset.
pub fn parse_utc_offset(offset: &str) -> Option<FixedOffset> {
    let offset = offset.trim();
    let (sign, rest) = match offset.bytes().next()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };

    let compact = rest.replace(':', "");
    if compact.len() != 4 || !compact.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = compact[..2].parse().ok()?;
    let minutes: i32 = compact[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Attaches a textual UTC offset to an offset-less timestamp.
pub fn fuse_utc_offset(timestamp: NaiveDateTime, offset: &str) -> Option<DateTime<FixedOffset>> {
    parse_utc_offset(offset)?
        .from_local_datetime(&timestamp)
        .single()
}
