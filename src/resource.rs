//! Resource accessor
//!
//! A [`Resource`] is what callers hand to the extraction manager: a local
//! file path with a declared media type and a stable identifier for
//! diagnostics. The bytes are materialized per extractor call and dropped
//! with the call.

use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Resource {
    path: PathBuf,
    media_type: String,
    identifier: String,
}

impl Resource {
    /// Resource with an explicitly declared media type.
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        let path = path.into();
        let identifier = identifier_for(&path);
        Self {
            path,
            media_type: media_type.into(),
            identifier,
        }
    }

    /// Resource with the media type detected from the file itself: magic
    /// numbers first, extension as fallback.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = detect_media_type(&path);
        Self::new(path, media_type)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Stable identifier used in diagnostics (the file name).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Materializes the resource content for one extractor call.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|source| ExtractError::UnreadableResource {
            identifier: self.identifier.clone(),
            source,
        })
    }
}

fn identifier_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Detects the media type of a file, preferring magic numbers over the
/// extension.
pub fn detect_media_type(path: &Path) -> String {
    if let Ok(Some(kind)) = infer::get_from_path(path) {
        return kind.mime_type().to_string();
    }
    detect_media_type_from_extension(path)
}

/// Media type from the file extension alone.
pub fn detect_media_type_from_extension(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        "heic" | "heif" => "image/heic",
        "avif" => "image/avif",
        "psd" => "image/psd",
        "jp2" => "image/jp2",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Checks a declared media range (`image/jpeg`, `image/*`, `*/*`) against a
/// concrete media type. Parameters after `;` are ignored.
pub fn media_range_matches(range: &str, media_type: &str) -> bool {
    let normalize = |value: &str| -> String {
        value
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    };
    let range = normalize(range);
    let media_type = normalize(media_type);

    if range == "*" || range == "*/*" {
        return true;
    }

    let (Some((range_type, range_subtype)), Some((media_main, media_subtype))) =
        (range.split_once('/'), media_type.split_once('/'))
    else {
        return range == media_type;
    };

    range_type == media_main && (range_subtype == "*" || range_subtype == media_subtype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn media_range_matching() {
        assert!(media_range_matches("image/jpeg", "image/jpeg"));
        assert!(media_range_matches("image/*", "image/jpeg"));
        assert!(media_range_matches("image/*", "image/tiff"));
        assert!(media_range_matches("*/*", "video/jpeg"));
        assert!(media_range_matches("image/jpeg", "image/jpeg; charset=binary"));

        assert!(!media_range_matches("image/jpeg", "image/png"));
        assert!(!media_range_matches("image/*", "video/jpeg"));
        assert!(!media_range_matches("image/jpeg", "image"));
    }

    #[test]
    fn extension_detection() {
        assert_eq!(
            detect_media_type_from_extension(Path::new("photo.JPG")),
            "image/jpeg"
        );
        assert_eq!(
            detect_media_type_from_extension(Path::new("scan.tif")),
            "image/tiff"
        );
        assert_eq!(
            detect_media_type_from_extension(Path::new("unknown.xyz")),
            "application/octet-stream"
        );
    }

    #[test]
    fn magic_numbers_win_over_extension() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        // JPEG magic despite the .png extension
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46])
            .unwrap();
        file.flush().unwrap();

        let resource = Resource::from_path(file.path());
        assert_eq!(resource.media_type(), "image/jpeg");
    }

    #[test]
    fn unreadable_resource_reports_identifier() {
        let resource = Resource::new("/nonexistent/photo.jpg", "image/jpeg");
        assert_eq!(resource.identifier(), "photo.jpg");
        let error = resource.bytes().unwrap_err();
        assert!(error.to_string().contains("photo.jpg"));
    }
}
