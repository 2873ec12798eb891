//! End-to-end extraction over synthetic JPEG bytes.

use photometa::{Asset, ExtractionManager, MissingExtractorPolicy, Resource};
use std::io::Write;

fn dataset(record: u8, number: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x1C, record, number];
    bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Minimal JPEG carrying the given IIM bytes in an APP13 Photoshop 8BIM
/// resource, and no EXIF block.
fn jpeg_with_iptc(iim: &[u8]) -> Vec<u8> {
    let mut resource = Vec::new();
    resource.extend_from_slice(b"Photoshop 3.0\0");
    resource.extend_from_slice(b"8BIM");
    resource.extend_from_slice(&0x0404u16.to_be_bytes());
    resource.extend_from_slice(&[0x00, 0x00]);
    resource.extend_from_slice(&(iim.len() as u32).to_be_bytes());
    resource.extend_from_slice(iim);
    if iim.len() % 2 == 1 {
        resource.push(0x00);
    }

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xED];
    jpeg.extend_from_slice(&((resource.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&resource);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn write_temp_jpeg(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn extraction_merges_domains_and_tolerates_a_failing_extractor() {
    let mut iim = Vec::new();
    iim.extend_from_slice(&dataset(2, 5, b"Harbour at dawn"));
    iim.extend_from_slice(&dataset(2, 25, b"harbour"));
    iim.extend_from_slice(&dataset(2, 25, b"dawn"));
    iim.extend_from_slice(&dataset(2, 55, b"20130918"));
    iim.extend_from_slice(&dataset(2, 60, b"105911+0200"));
    iim.extend_from_slice(&dataset(2, 15, b"ACE"));
    let file = write_temp_jpeg(&jpeg_with_iptc(&iim));

    let mut asset = Asset::new(Resource::new(file.path(), "image/jpeg"));
    asset.title = "Harbour".to_string();
    asset.tags = vec!["archive".to_string()];

    // The EXIF extractor matches image/jpeg too, but this file carries no
    // EXIF block; its failure must not suppress the IPTC result.
    let collection = ExtractionManager::new().extract(&asset).unwrap();

    assert!(collection.get("exif").is_none());

    let iptc = collection.get("iptc").expect("iptc record missing");
    assert_eq!(iptc.text("Title"), "Harbour at dawn");
    assert_eq!(iptc.texts("Keywords"), vec!["harbour", "dawn"]);
    assert_eq!(iptc.texts("SubjectCodes"), vec!["01000000"]);
    assert_eq!(
        iptc.timestamp_tz("CreationDate").unwrap().to_rfc3339(),
        "2013-09-18T10:59:11+02:00"
    );

    let asset_record = collection.get("asset").expect("asset record missing");
    assert_eq!(asset_record.text("Title"), "Harbour");
    assert_eq!(asset_record.texts("Tags"), vec!["archive"]);
}

#[test]
fn media_type_is_detected_from_the_file() {
    let mut iim = Vec::new();
    iim.extend_from_slice(&dataset(2, 90, b"Dunedin"));
    let file = write_temp_jpeg(&jpeg_with_iptc(&iim));

    let collection = ExtractionManager::new()
        .extract_from_path(file.path())
        .unwrap();

    let iptc = collection.get("iptc").expect("iptc record missing");
    assert_eq!(iptc.text("City"), "Dunedin");
}

#[test]
fn unmatched_media_type_follows_the_configured_policy() {
    let file = write_temp_jpeg(&[0xFF, 0xD8, 0xFF, 0xD9]);
    let asset = Asset::new(Resource::new(file.path(), "application/pdf"));

    let partial = ExtractionManager::new().extract(&asset).unwrap();
    assert_eq!(partial.len(), 1);
    assert!(partial.get("asset").is_some());

    let strict = ExtractionManager::new().with_policy(MissingExtractorPolicy::Fail);
    assert!(strict.extract(&asset).is_err());
}

#[test]
fn unreadable_resource_still_produces_the_asset_record() {
    let asset = Asset::new(Resource::new("/nonexistent/missing.jpg", "image/jpeg"));
    let collection = ExtractionManager::new().extract(&asset).unwrap();

    // both extractors fail with an unreadable resource and are skipped
    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.get("asset").map(|r| r.text("FileName")),
        Some("missing.jpg")
    );
}
