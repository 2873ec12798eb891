//! EXIF 2.31 tag dictionary
//!
//! Tag numbers, canonical field names and enumerated value interpretations
//! per CIPA DC-008-Translation-2016 (EXIF 2.31), with the vendor extensions
//! commonly seen in the wild. Everything here is constant data expressed as
//! match functions, safe for concurrent reads.

use crate::value::MetaValue;
use chrono::NaiveDateTime;

/// Canonical field name for a TIFF/Exif IFD tag number.
pub fn ifd_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        // TIFF Rev. 6.0 attribute information
        0x100 => "ImageWidth",
        0x101 => "ImageLength",
        0x102 => "BitsPerSample",
        0x103 => "Compression",
        0x106 => "PhotometricInterpretation",
        0x112 => "Orientation",
        0x115 => "SamplesPerPixel",
        0x11C => "PlanarConfiguration",
        0x212 => "YCbCrSubSampling",
        0x213 => "YCbCrPositioning",
        0x11A => "XResolution",
        0x11B => "YResolution",
        0x128 => "ResolutionUnit",
        0x111 => "StripOffsets",
        0x116 => "RowsPerStrip",
        0x117 => "StripByteCounts",
        0x201 => "JPEGInterchangeFormat",
        0x202 => "JPEGInterchangeFormatLength",
        0x12D => "TransferFunction",
        0x13E => "WhitePoint",
        0x13F => "PrimaryChromaticities",
        0x211 => "YCbCrCoefficients",
        0x214 => "ReferenceBlackWhite",
        0x132 => "DateTime",
        0x10E => "ImageDescription",
        0x10F => "Make",
        0x110 => "Model",
        0x131 => "Software",
        0x13B => "Artist",
        0x8298 => "Copyright",
        // Exif IFD attribute information
        0x9000 => "ExifVersion",
        0xA000 => "FlashpixVersion",
        0xA001 => "ColorSpace",
        0xA500 => "Gamma",
        0x9101 => "ComponentsConfiguration",
        0x9102 => "CompressedBitsPerPixel",
        0xA002 => "PixelXDimension",
        0xA003 => "PixelYDimension",
        0x927C => "MakerNote",
        0x9286 => "UserComment",
        0xA004 => "RelatedSoundFile",
        0x9003 => "DateTimeOriginal",
        0x9004 => "DateTimeDigitized",
        0x9010 => "OffsetTime",
        0x9011 => "OffsetTimeOriginal",
        0x9012 => "OffsetTimeDigitized",
        0x9290 => "SubSecTime",
        0x9291 => "SubSecTimeOriginal",
        0x9292 => "SubSecTimeDigitized",
        0x829A => "ExposureTime",
        0x829D => "FNumber",
        0x8822 => "ExposureProgram",
        0x8824 => "SpectralSensitivity",
        // was "ISOSpeedRatings" up to version 2.21
        0x8827 => "PhotographicSensitivity",
        0x8828 => "OECF",
        0x8830 => "SensitivityType",
        0x8831 => "StandardOutputSensitivity",
        0x8832 => "RecommendedExposureIndex",
        0x8833 => "ISOSpeed",
        0x8834 => "ISOSpeedLatitudeyyy",
        0x8835 => "ISOSpeedLatitudezzz",
        0x9201 => "ShutterSpeedValue",
        0x9202 => "ApertureValue",
        0x9203 => "BrightnessValue",
        0x9204 => "ExposureBiasValue",
        0x9205 => "MaxApertureValue",
        0x9206 => "SubjectDistance",
        0x9207 => "MeteringMode",
        0x9208 => "LightSource",
        0x9209 => "Flash",
        0x920A => "FocalLength",
        0x9214 => "SubjectArea",
        0xA20B => "FlashEnergy",
        0xA20C => "SpatialFrequencyResponse",
        0xA20E => "FocalPlaneXResolution",
        0xA20F => "FocalPlaneYResolution",
        0xA210 => "FocalPlaneResolutionUnit",
        0xA214 => "SubjectLocation",
        0xA215 => "ExposureIndex",
        0xA217 => "SensingMethod",
        0xA300 => "FileSource",
        0xA301 => "SceneType",
        0xA302 => "CFAPattern",
        0xA401 => "CustomRendered",
        0xA402 => "ExposureMode",
        0xA403 => "WhiteBalance",
        0xA404 => "DigitalZoomRatio",
        0xA405 => "FocalLengthIn35mmFilm",
        0xA406 => "SceneCaptureType",
        0xA407 => "GainControl",
        0xA408 => "Contrast",
        0xA409 => "Saturation",
        0xA40A => "Sharpness",
        0xA40B => "DeviceSettingDescription",
        0xA40C => "SubjectDistanceRange",
        0x9400 => "Temperature",
        0x9401 => "Humidity",
        0x9402 => "Pressure",
        0x9403 => "WaterDepth",
        0x9404 => "Acceleration",
        0x9405 => "CameraElevationAngle",
        0xA420 => "ImageUniqueID",
        0xA430 => "CameraOwnerName",
        0xA431 => "BodySerialNumber",
        0xA432 => "LensSpecification",
        0xA433 => "LensMake",
        0xA434 => "LensModel",
        0xA435 => "LensSerialNumber",
        _ => return None,
    })
}

/// Canonical field name for a GPS IFD tag number.
pub fn gps_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0 => "GPSVersionID",
        0x1 => "GPSLatitudeRef",
        0x2 => "GPSLatitude",
        0x3 => "GPSLongitudeRef",
        0x4 => "GPSLongitude",
        0x5 => "GPSAltitudeRef",
        0x6 => "GPSAltitude",
        0x7 => "GPSTimeStamp",
        0x8 => "GPSSatellites",
        0x9 => "GPSStatus",
        0xA => "GPSMeasureMode",
        0xB => "GPSDOP",
        0xC => "GPSSpeedRef",
        0xD => "GPSSpeed",
        0xE => "GPSTrackRef",
        0xF => "GPSTrack",
        0x10 => "GPSImgDirectionRef",
        0x11 => "GPSImgDirection",
        0x12 => "GPSMapDatum",
        0x13 => "GPSDestLatitudeRef",
        0x14 => "GPSDestLatitude",
        0x15 => "GPSDestLongitudeRef",
        0x16 => "GPSDestLongitude",
        0x17 => "GPSDestBearingRef",
        0x18 => "GPSDestBearing",
        0x19 => "GPSDestDistanceRef",
        0x1A => "GPSDestDistance",
        0x1B => "GPSProcessingMethod",
        0x1C => "GPSAreaInformation",
        0x1D => "GPSDateStamp",
        0x1E => "GPSDifferential",
        0x1F => "GPSHPositioningError",
        _ => return None,
    })
}

/// Human-readable interpretation for an integer-coded enumerated field.
///
/// Unmapped codes yield `None` and pass through unchanged.
pub fn interpret_code(field: &str, code: i64) -> Option<&'static str> {
    Some(match (field, code) {
        ("Compression", 1) => "uncompressed",
        ("Compression", 6) => "JPEG compression (thumbnails only)",
        ("Compression", 2) => "CCITT 1D",
        ("Compression", 3) => "T4/Group 3 Fax",
        ("Compression", 4) => "T6/Group 4 Fax",
        ("Compression", 5) => "LZW",
        ("Compression", 7) => "JPEG",
        ("Compression", 8) => "Adobe Deflate",
        ("Compression", 9) => "JBIG B&W",
        ("Compression", 10) => "JBIG Color",
        ("Compression", 99) => "JPEG",
        ("Compression", 262) => "Kodak 262",
        ("Compression", 32766) => "Next",
        ("Compression", 32767) => "Sony ARW Compressed",
        ("Compression", 32769) => "Packed RAW",
        ("Compression", 32770) => "Samsung SRW Compressed",
        ("Compression", 32771) => "CCIRLEW",
        ("Compression", 32772) => "Samsung SRW Compressed 2",
        ("Compression", 32773) => "PackBits",
        ("Compression", 32809) => "Thunderscan",
        ("Compression", 32867) => "Kodak KDC Compressed",
        ("Compression", 32895) => "IT8CTPAD",
        ("Compression", 32896) => "IT8LW",
        ("Compression", 32897) => "IT8MP",
        ("Compression", 32898) => "IT8BL",
        ("Compression", 32908) => "PixarFilm",
        ("Compression", 32909) => "PixarLog",
        ("Compression", 32946) => "Deflate",
        ("Compression", 32947) => "DCS",
        ("Compression", 34661) => "JBIG",
        ("Compression", 34676) => "SGILog",
        ("Compression", 34677) => "SGILog24",
        ("Compression", 34712) => "JPEG 2000",
        ("Compression", 34713) => "Nikon NEF Compressed",
        ("Compression", 34715) => "JBIG2 TIFF FX",
        ("Compression", 34718) => "Microsoft Document Imaging (MDI) Binary Level Codec",
        ("Compression", 34719) => "Microsoft Document Imaging (MDI) Progressive Transform Codec",
        ("Compression", 34720) => "Microsoft Document Imaging (MDI) Vector",
        ("Compression", 34892) => "Lossy JPEG",
        ("Compression", 65000) => "Kodak DCR Compressed",
        ("Compression", 65535) => "Pentax PEF Compressed",

        ("PhotometricInterpretation", 2) => "RGB",
        ("PhotometricInterpretation", 6) => "YCbCr",
        ("PhotometricInterpretation", 0) => "WhiteIsZero",
        ("PhotometricInterpretation", 1) => "BlackIsZero",
        ("PhotometricInterpretation", 3) => "RGB Palette",
        ("PhotometricInterpretation", 4) => "Transparency Mask",
        ("PhotometricInterpretation", 5) => "CMYK",
        ("PhotometricInterpretation", 8) => "CIELab",
        ("PhotometricInterpretation", 9) => "ICCLab",
        ("PhotometricInterpretation", 10) => "ITULab",
        ("PhotometricInterpretation", 32803) => "Color Filter Array",
        ("PhotometricInterpretation", 32844) => "Pixar LogL",
        ("PhotometricInterpretation", 32845) => "Pixar LogLuv",
        ("PhotometricInterpretation", 34892) => "Linear Raw",

        ("Orientation", 1) => {
            "The 0th row is at the visual top of the image, and the 0th column is the visual left-hand side"
        }
        ("Orientation", 2) => {
            "The 0th row is at the visual top of the image, and the 0th column is the visual right-hand side"
        }
        ("Orientation", 3) => {
            "The 0th row is at the visual bottom of the image, and the 0th column is the visual right-hand side"
        }
        ("Orientation", 4) => {
            "The 0th row is at the visual bottom of the image, and the 0th column is the visual left-hand side"
        }
        ("Orientation", 5) => {
            "The 0th row is at the visual left-hand side of the image, and the 0th column is the visual top"
        }
        ("Orientation", 6) => {
            "The 0th row is at the visual right-hand side of the image, and the 0th column is the visual top"
        }
        ("Orientation", 7) => {
            "The 0th row is at the visual right-hand side of the image, and the 0th column is the visual bottom"
        }
        ("Orientation", 8) => {
            "The 0th row is at the visual left-hand side of the image, and the 0th column is the visual bottom"
        }

        ("PlanarConfiguration", 1) => "chunky format",
        ("PlanarConfiguration", 2) => "planar format",

        ("YCbCrPositioning", 1) => "centered",
        ("YCbCrPositioning", 2) => "co-sited",

        ("ResolutionUnit", 2) => "inches",
        ("ResolutionUnit", 3) => "centimeters",
        ("ResolutionUnit", 1) => "None",
        ("ResolutionUnit", 4) => "mm",
        ("ResolutionUnit", 5) => "um",

        ("ColorSpace", 1) => "sRGB",
        ("ColorSpace", 0xFFFF) => "Uncalibrated",
        ("ColorSpace", 2) => "Adobe RGB",
        ("ColorSpace", 0xFFFD) => "Wide Gamut RGB",
        ("ColorSpace", 0xFFFE) => "ICC Profile",
        ("ColorSpace", 5) => "CMYK",
        ("ColorSpace", 6) => "YUV",

        ("ExposureProgram", 0) => "Not defined",
        ("ExposureProgram", 1) => "Manual",
        ("ExposureProgram", 2) => "Normal program",
        ("ExposureProgram", 3) => "Aperture priority",
        ("ExposureProgram", 4) => "Shutter priority",
        ("ExposureProgram", 5) => "Creative program (biased toward depth of field)",
        ("ExposureProgram", 6) => "Action program (biased toward faster shutter speed)",
        ("ExposureProgram", 7) => "Portrait mode (for closeup photos with the background out of focus)",
        ("ExposureProgram", 8) => "Landscape mode (for landscape photos with the background in focus)",
        ("ExposureProgram", 9) => "Bulb",

        ("SensitivityType", 0) => "Unknown",
        ("SensitivityType", 1) => "Standard output sensitivity (SOS)",
        ("SensitivityType", 2) => "Recommended exposure index (REI)",
        ("SensitivityType", 3) => "ISO Speed",
        ("SensitivityType", 4) => "Standard output sensitivity (SOS) and Recommended exposure index (REI)",
        ("SensitivityType", 5) => "Standard output sensitivity (SOS) and ISO Speed",
        ("SensitivityType", 6) => "Recommended exposure index (REI) and ISO Speed",
        ("SensitivityType", 7) => {
            "Standard output sensitivity (SOS) and Recommended exposure index (REI) and ISO Speed"
        }

        ("MeteringMode", 0) => "unknown",
        ("MeteringMode", 1) => "Average",
        ("MeteringMode", 2) => "CenterWeightedAverage",
        ("MeteringMode", 3) => "Spot",
        ("MeteringMode", 4) => "MultiSpot",
        ("MeteringMode", 5) => "Pattern",
        ("MeteringMode", 6) => "Partial",
        ("MeteringMode", 255) => "other",

        ("LightSource", 0) => "unknown",
        ("LightSource", 1) => "Daylight",
        ("LightSource", 2) => "Fluorescent",
        ("LightSource", 3) => "Tungsten (incandescent light)",
        ("LightSource", 4) => "Flash",
        ("LightSource", 9) => "Fine weather",
        ("LightSource", 10) => "Cloudy weather",
        ("LightSource", 11) => "Shade",
        ("LightSource", 12) => "Daylight fluorescent (D 5700 - 7100K)",
        ("LightSource", 13) => "Day white fluorescent (N 4600 - 5500K)",
        ("LightSource", 14) => "Cool white fluorescent (W 3800 - 4500K)",
        ("LightSource", 15) => "White fluorescent (WW 3250 - 3800K)",
        ("LightSource", 16) => "Warm white fluorescent (L 2600 - 3250K)",
        ("LightSource", 17) => "Standard light A",
        ("LightSource", 18) => "Standard light B",
        ("LightSource", 19) => "Standard light C",
        ("LightSource", 20) => "D55",
        ("LightSource", 21) => "D65",
        ("LightSource", 22) => "D75",
        ("LightSource", 23) => "D50",
        ("LightSource", 24) => "ISO studio tungsten",
        ("LightSource", 255) => "other light source",

        ("FocalPlaneResolutionUnit", 2) => "inches",
        ("FocalPlaneResolutionUnit", 3) => "centimeters",
        ("FocalPlaneResolutionUnit", 1) => "None",
        ("FocalPlaneResolutionUnit", 4) => "mm",
        ("FocalPlaneResolutionUnit", 5) => "um",

        ("SensingMethod", 1) => "Not defined / Monochrome area",
        ("SensingMethod", 2) => "One-chip color area sensor",
        ("SensingMethod", 3) => "Two-chip color area sensor",
        ("SensingMethod", 4) => "Three-chip color area sensor",
        ("SensingMethod", 5) => "Color sequential area sensor",
        ("SensingMethod", 6) => "Monochrome linear",
        ("SensingMethod", 7) => "Trilinear sensor",
        ("SensingMethod", 8) => "Color sequential linear sensor",

        ("FileSource", 0) => "others",
        ("FileSource", 1) => "scanner of transparent type",
        ("FileSource", 2) => "scanner of reflex type",
        ("FileSource", 3) => "DSC",

        ("SceneType", 1) => "A directly photographed image",

        ("CustomRendered", 0) => "Normal process",
        ("CustomRendered", 1) => "Custom process",

        ("ExposureMode", 0) => "Auto exposure",
        ("ExposureMode", 1) => "Manual exposure",
        ("ExposureMode", 2) => "Auto bracket",

        ("WhiteBalance", 0) => "Auto white balance",
        ("WhiteBalance", 1) => "Manual white balance",

        ("SceneCaptureType", 0) => "Standard",
        ("SceneCaptureType", 1) => "Landscape",
        ("SceneCaptureType", 2) => "Portrait",
        ("SceneCaptureType", 3) => "Night scene",

        ("GainControl", 0) => "None",
        ("GainControl", 1) => "Low gain up",
        ("GainControl", 2) => "High gain up",
        ("GainControl", 3) => "Low gain down",
        ("GainControl", 4) => "High gain down",

        ("Contrast", 0) => "Normal",
        ("Contrast", 1) => "Soft",
        ("Contrast", 2) => "Hard",

        ("Saturation", 0) => "Normal",
        ("Saturation", 1) => "Low saturation",
        ("Saturation", 2) => "High saturation",

        ("Sharpness", 0) => "Normal",
        ("Sharpness", 1) => "Soft",
        ("Sharpness", 2) => "Hard",

        ("SubjectDistanceRange", 0) => "unknown",
        ("SubjectDistanceRange", 1) => "Macro",
        ("SubjectDistanceRange", 2) => "Close view",
        ("SubjectDistanceRange", 3) => "Distant view",

        ("GPSAltitudeRef", 0) => "Sea level",
        ("GPSAltitudeRef", 1) => "Sea level reference (negative value)",

        ("GPSDifferential", 0) => "Measurement without differential correction",
        ("GPSDifferential", 1) => "Differential correction applied",

        _ => return None,
    })
}

/// Human-readable interpretation for a string-coded enumerated field.
pub fn interpret_text(field: &str, value: &str) -> Option<&'static str> {
    Some(match (field, value) {
        ("FlashpixVersion", "0100") => "Flashpix Format Version 1.0",

        ("GPSLatitudeRef", "N") => "North latitude",
        ("GPSLatitudeRef", "S") => "South latitude",
        ("GPSLongitudeRef", "E") => "East longitude",
        ("GPSLongitudeRef", "W") => "West longitude",

        ("GPSStatus", "A") => "Measurement in progress",
        ("GPSStatus", "V") => "Measurement interrupted",

        ("GPSMeasureMode", "2") => "2-dimensional measurement",
        ("GPSMeasureMode", "3") => "3-dimensional measurement",

        ("GPSSpeedRef", "K") => "Kilometers per hour",
        ("GPSSpeedRef", "M") => "Miles per hour",
        ("GPSSpeedRef", "N") => "Knots",

        ("GPSTrackRef", "T") => "True direction",
        ("GPSTrackRef", "M") => "Magnetic direction",
        ("GPSImgDirectionRef", "T") => "True direction",
        ("GPSImgDirectionRef", "M") => "Magnetic direction",

        ("GPSDestLatitudeRef", "N") => "North latitude",
        ("GPSDestLatitudeRef", "S") => "South latitude",
        ("GPSDestLongitudeRef", "E") => "East longitude",
        ("GPSDestLongitudeRef", "W") => "West longitude",

        ("GPSDestBearingRef", "T") => "True direction",
        ("GPSDestBearingRef", "M") => "Magnetic direction",

        ("GPSDestDistanceRef", "K") => "Kilometers",
        ("GPSDestDistanceRef", "M") => "Miles",
        ("GPSDestDistanceRef", "N") => "Nautical miles",

        _ => return None,
    })
}

/// Interprets one field value.
///
/// Composite fields (`DateTime*`, `YCbCrSubSampling`,
/// `ComponentsConfiguration`, `Flash`) get dedicated decoders; every other
/// field is looked up in the enumerated tables. Values without an
/// interpretation pass through unchanged.
pub fn interpret_value(field: &str, value: MetaValue) -> MetaValue {
    match field {
        "DateTime" | "DateTimeOriginal" | "DateTimeDigitized" => {
            if let Some(text) = value.as_str() {
                if let Ok(timestamp) =
                    NaiveDateTime::parse_from_str(text.trim(), "%Y:%m:%d %H:%M:%S")
                {
                    return MetaValue::DateTime(timestamp);
                }
            }
            value
        }
        "YCbCrSubSampling" => interpret_subsampling(value),
        "ComponentsConfiguration" => interpret_components(value),
        "Flash" => match value.as_i64() {
            Some(code) => MetaValue::Text(describe_flash(code)),
            None => value,
        },
        _ => match &value {
            MetaValue::Integer(code) => match interpret_code(field, *code) {
                Some(text) => MetaValue::Text(text.to_string()),
                None => value,
            },
            MetaValue::Float(f) if f.fract() == 0.0 => match interpret_code(field, *f as i64) {
                Some(text) => MetaValue::Text(text.to_string()),
                None => value,
            },
            MetaValue::Text(s) => match interpret_text(field, s) {
                Some(text) => MetaValue::Text(text.to_string()),
                None => value,
            },
            _ => value,
        },
    }
}

fn interpret_subsampling(value: MetaValue) -> MetaValue {
    if let Some(items) = value.as_list() {
        let horizontal = items.first().and_then(MetaValue::as_i64);
        let vertical = items.get(1).and_then(MetaValue::as_i64);
        if horizontal == Some(2) {
            match vertical {
                Some(1) => return MetaValue::Text("YCbCr4:2:2".to_string()),
                Some(2) => return MetaValue::Text("YCbCr4:2:0".to_string()),
                _ => {}
            }
        }
    }
    value
}

fn interpret_components(value: MetaValue) -> MetaValue {
    let bytes = match &value {
        MetaValue::Bytes(bytes) => bytes.as_slice(),
        MetaValue::Text(text) => text.as_bytes(),
        _ => return value,
    };
    let mut interpreted = String::new();
    for &byte in bytes {
        // byte 0 means "component does not exist"
        let component = match byte {
            1 => "Y",
            2 => "Cb",
            3 => "Cr",
            4 => "R",
            5 => "G",
            6 => "B",
            _ => continue,
        };
        interpreted.push_str(component);
    }
    MetaValue::Text(interpreted)
}

/// Decodes the bit-packed Flash byte into a descriptive sentence.
fn describe_flash(code: i64) -> String {
    let fired = code & 0b1;
    let strobe_return = (code >> 1) & 0b11;
    let mode = (code >> 3) & 0b11;
    let function = (code >> 5) & 0b1;
    let red_eye = (code >> 6) & 0b1;

    let mut description = String::new();
    description.push_str(if fired == 0b1 {
        "Flash fired."
    } else {
        "Flash did not fire."
    });
    match strobe_return {
        0b00 => description.push_str(" No strobe return detection function."),
        0b10 => description.push_str(" Strobe return light not detected."),
        0b11 => description.push_str(" Strobe return light detected."),
        _ => {}
    }
    match mode {
        0b00 => description.push_str(" Flash mode unknown."),
        0b01 => description.push_str(" Compulsory flash firing."),
        0b10 => description.push_str(" Compulsory flash suppression."),
        0b11 => description.push_str(" Auto flash mode."),
        _ => {}
    }
    description.push_str(if function == 0b1 {
        " No flash function."
    } else {
        " Flash function present."
    });
    description.push_str(if red_eye == 0b1 {
        " Red-eye reduction supported."
    } else {
        " No red-eye reduction mode or unknown."
    });

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn tag_names_cover_both_ifds() {
        assert_eq!(ifd_tag_name(0x8827), Some("PhotographicSensitivity"));
        assert_eq!(ifd_tag_name(0xA434), Some("LensModel"));
        assert_eq!(ifd_tag_name(0xFFFF), None);
        assert_eq!(gps_tag_name(0x2), Some("GPSLatitude"));
        assert_eq!(gps_tag_name(0x1D), Some("GPSDateStamp"));
        assert_eq!(gps_tag_name(0xAB), None);
    }

    #[test]
    fn enumerated_codes_are_interpreted() {
        assert_eq!(
            interpret_value("MeteringMode", MetaValue::Integer(5)),
            MetaValue::Text("Pattern".to_string())
        );
        assert_eq!(
            interpret_value("ColorSpace", MetaValue::Integer(1)),
            MetaValue::Text("sRGB".to_string())
        );
        assert_eq!(
            interpret_value("GPSStatus", MetaValue::Text("A".to_string())),
            MetaValue::Text("Measurement in progress".to_string())
        );
    }

    #[test]
    fn integral_floats_hit_the_code_table() {
        // rational-kind fields like GainControl arrive as floats
        assert_eq!(
            interpret_value("GainControl", MetaValue::Float(1.0)),
            MetaValue::Text("Low gain up".to_string())
        );
    }

    #[test]
    fn unmapped_codes_pass_through() {
        assert_eq!(
            interpret_value("MeteringMode", MetaValue::Integer(42)),
            MetaValue::Integer(42)
        );
        assert_eq!(
            interpret_value("Make", MetaValue::Text("Canon".to_string())),
            MetaValue::Text("Canon".to_string())
        );
    }

    #[test]
    fn date_time_fields_are_parsed() {
        let expected = NaiveDate::from_ymd_opt(2016, 2, 5)
            .unwrap()
            .and_hms_opt(11, 16, 53)
            .unwrap();
        assert_eq!(
            interpret_value("DateTimeOriginal", MetaValue::Text("2016:02:05 11:16:53".to_string())),
            MetaValue::DateTime(expected)
        );
    }

    #[test]
    fn malformed_date_time_passes_through() {
        let raw = MetaValue::Text("not a timestamp".to_string());
        assert_eq!(interpret_value("DateTime", raw.clone()), raw);
    }

    #[test]
    fn subsampling_triples_are_decoded() {
        assert_eq!(
            interpret_value(
                "YCbCrSubSampling",
                MetaValue::List(vec![MetaValue::Integer(2), MetaValue::Integer(1)])
            ),
            MetaValue::Text("YCbCr4:2:2".to_string())
        );
        assert_eq!(
            interpret_value(
                "YCbCrSubSampling",
                MetaValue::List(vec![MetaValue::Integer(2), MetaValue::Integer(2)])
            ),
            MetaValue::Text("YCbCr4:2:0".to_string())
        );
        // unknown factors pass through
        let odd = MetaValue::List(vec![MetaValue::Integer(1), MetaValue::Integer(1)]);
        assert_eq!(interpret_value("YCbCrSubSampling", odd.clone()), odd);
    }

    #[test]
    fn components_configuration_concatenates_known_bytes() {
        assert_eq!(
            interpret_value(
                "ComponentsConfiguration",
                MetaValue::Bytes(vec![1, 2, 3, 0])
            ),
            MetaValue::Text("YCbCr".to_string())
        );
        assert_eq!(
            interpret_value("ComponentsConfiguration", MetaValue::Bytes(vec![4, 5, 6, 0])),
            MetaValue::Text("RGB".to_string())
        );
    }

    #[test]
    fn flash_byte_is_decoded_bit_by_bit() {
        let decoded = interpret_value("Flash", MetaValue::Integer(0x09));
        let text = decoded.as_str().unwrap();
        assert!(text.contains("Flash fired."));
        assert!(text.contains("Compulsory flash firing."));
        assert!(text.contains("No strobe return detection function."));

        let decoded = interpret_value("Flash", MetaValue::Integer(0x00));
        let text = decoded.as_str().unwrap();
        assert!(text.contains("Flash did not fire."));
        assert!(text.contains("Flash mode unknown."));
        assert!(text.contains("Flash function present."));

        // 0b1111111: fired, return detected, auto mode, no function, red-eye
        let decoded = interpret_value("Flash", MetaValue::Integer(0x7F));
        let text = decoded.as_str().unwrap();
        assert!(text.contains("Strobe return light detected."));
        assert!(text.contains("Auto flash mode."));
        assert!(text.contains("No flash function."));
    }
}
