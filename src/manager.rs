//! Extraction coordination
//!
//! The manager owns a statically registered list of extractors, dispatches a
//! resource to every extractor whose compatible media types match, and
//! tolerates individual extractor failures: a failing extractor is logged
//! and skipped, the remaining ones still run.

use crate::asset::Asset;
use crate::error::{ExtractError, Result};
use crate::exif::ExifExtractor;
use crate::iptc::IptcIimExtractor;
use crate::resource::{media_range_matches, Resource};
use crate::value::MetaDataCollection;
use tracing::{debug, warn};

/// One metadata extractor.
///
/// Implementations declare the media types they can handle and write their
/// canonical record into the collection under their domain key.
pub trait Extractor: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Media ranges this extractor can handle (`image/jpeg`, `image/*`).
    fn compatible_media_types(&self) -> &'static [&'static str];

    fn supports(&self, media_type: &str) -> bool {
        self.compatible_media_types()
            .iter()
            .any(|range| media_range_matches(range, media_type))
    }

    fn extract(&self, resource: &Resource, collection: &mut MetaDataCollection) -> Result<()>;
}

/// What to do when no registered extractor matches the resource's media type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingExtractorPolicy {
    /// Return the collection built so far (the asset record only).
    #[default]
    ReturnPartial,
    /// Fail the extraction with [`ExtractError::NoExtractor`].
    Fail,
}

/// Dispatches extraction runs over the registered extractors.
pub struct ExtractionManager {
    extractors: Vec<Box<dyn Extractor>>,
    policy: MissingExtractorPolicy,
}

impl ExtractionManager {
    /// Manager with the built-in extractors registered.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(ExifExtractor::new()),
                Box::new(IptcIimExtractor::new()),
            ],
            policy: MissingExtractorPolicy::default(),
        }
    }

    /// Manager without any extractors.
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
            policy: MissingExtractorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MissingExtractorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Extracts all metadata for one asset.
    ///
    /// The asset record is always part of the result. Each suitable extractor
    /// runs in registration order; extractors targeting the same domain key
    /// overwrite each other, last write wins. An extractor failure is
    /// reported and skipped, it never aborts the run.
    pub fn extract(&self, asset: &Asset) -> Result<MetaDataCollection> {
        let resource = &asset.resource;

        let mut collection = MetaDataCollection::new();
        collection.set("asset", asset.record());

        let suitable: Vec<&dyn Extractor> = self
            .extractors
            .iter()
            .filter(|extractor| extractor.supports(resource.media_type()))
            .map(|extractor| extractor.as_ref())
            .collect();

        if suitable.is_empty() && self.policy == MissingExtractorPolicy::Fail {
            return Err(ExtractError::NoExtractor(
                resource.media_type().to_string(),
            ));
        }

        for extractor in suitable {
            match extractor.extract(resource, &mut collection) {
                Ok(()) => debug!(
                    "{} extracted metadata from {}",
                    extractor.name(),
                    resource.identifier()
                ),
                // suitable in theory, but this particular file lacks the data
                Err(error) => warn!(
                    "Skipping {} extractor for {}: {}",
                    extractor.name(),
                    resource.identifier(),
                    error
                ),
            }
        }

        Ok(collection)
    }

    /// Convenience: extraction for a bare file path with a detected media
    /// type and no asset-level attributes.
    pub fn extract_from_path(&self, path: impl Into<std::path::PathBuf>) -> Result<MetaDataCollection> {
        self.extract(&Asset::new(Resource::from_path(path)))
    }
}

impl Default for ExtractionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CanonicalRecord;

    struct StubExtractor {
        name: &'static str,
        media_types: &'static [&'static str],
        domain: &'static str,
        value: &'static str,
        fail: bool,
    }

    impl Extractor for StubExtractor {
        fn name(&self) -> &'static str {
            self.name
        }

        fn compatible_media_types(&self) -> &'static [&'static str] {
            self.media_types
        }

        fn extract(&self, resource: &Resource, collection: &mut MetaDataCollection) -> Result<()> {
            if self.fail {
                return Err(ExtractError::NoData {
                    identifier: resource.identifier().to_string(),
                    kind: "stub",
                });
            }
            let mut record = CanonicalRecord::new();
            record.set("Value", self.value);
            collection.set(self.domain, record);
            Ok(())
        }
    }

    fn jpeg_asset() -> Asset {
        Asset::new(Resource::new("/photos/test.jpg", "image/jpeg"))
    }

    #[test]
    fn dispatches_to_all_matching_extractors() {
        let mut manager = ExtractionManager::empty();
        manager.register(Box::new(StubExtractor {
            name: "a",
            media_types: &["image/jpeg"],
            domain: "a",
            value: "one",
            fail: false,
        }));
        manager.register(Box::new(StubExtractor {
            name: "b",
            media_types: &["image/*"],
            domain: "b",
            value: "two",
            fail: false,
        }));
        manager.register(Box::new(StubExtractor {
            name: "c",
            media_types: &["video/mp4"],
            domain: "c",
            value: "three",
            fail: false,
        }));

        let collection = manager.extract(&jpeg_asset()).unwrap();
        assert!(collection.get("a").is_some());
        assert!(collection.get("b").is_some());
        assert!(collection.get("c").is_none());
        assert!(collection.get("asset").is_some());
    }

    #[test]
    fn failing_extractor_does_not_abort_the_run() {
        let mut manager = ExtractionManager::empty();
        manager.register(Box::new(StubExtractor {
            name: "broken",
            media_types: &["image/jpeg"],
            domain: "broken",
            value: "",
            fail: true,
        }));
        manager.register(Box::new(StubExtractor {
            name: "working",
            media_types: &["image/jpeg"],
            domain: "working",
            value: "ok",
            fail: false,
        }));

        let collection = manager.extract(&jpeg_asset()).unwrap();
        assert!(collection.get("broken").is_none());
        assert_eq!(collection.get("working").map(|r| r.text("Value")), Some("ok"));
    }

    #[test]
    fn same_domain_key_is_last_write_wins() {
        let mut manager = ExtractionManager::empty();
        manager.register(Box::new(StubExtractor {
            name: "first",
            media_types: &["image/jpeg"],
            domain: "shared",
            value: "first",
            fail: false,
        }));
        manager.register(Box::new(StubExtractor {
            name: "second",
            media_types: &["image/jpeg"],
            domain: "shared",
            value: "second",
            fail: false,
        }));

        let collection = manager.extract(&jpeg_asset()).unwrap();
        assert_eq!(
            collection.get("shared").map(|r| r.text("Value")),
            Some("second")
        );
    }

    #[test]
    fn return_partial_policy_keeps_the_asset_record() {
        let manager = ExtractionManager::empty();
        let collection = manager.extract(&jpeg_asset()).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.get("asset").is_some());
    }

    #[test]
    fn fail_policy_signals_missing_extractor() {
        let manager = ExtractionManager::empty().with_policy(MissingExtractorPolicy::Fail);
        let error = manager.extract(&jpeg_asset()).unwrap_err();
        assert!(matches!(error, ExtractError::NoExtractor(media) if media == "image/jpeg"));
    }

    #[test]
    fn built_in_extractors_cover_jpeg_and_tiff() {
        let manager = ExtractionManager::new();
        let exif = ExifExtractor::new();
        let iptc = IptcIimExtractor::new();

        assert!(exif.supports("image/jpeg"));
        assert!(exif.supports("image/tiff"));
        assert!(!exif.supports("image/png"));
        assert!(iptc.supports("image/png"));
        assert!(iptc.supports("image/jpeg"));
        assert!(!iptc.supports("video/mp4"));

        // both built-ins registered
        assert_eq!(manager.extractors.len(), 2);
    }
}
