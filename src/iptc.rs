//! IPTC-IIM normalization
//!
//! Maps the raw IIM property store onto canonical field names, fuses the
//! split date/time datasets and reconciles the deprecated category datasets
//! into modern subject reference codes.

use crate::convert;
use crate::decode;
use crate::error::{ExtractError, Result};
use crate::iim_spec::{self, DataSet, IimProperties};
use crate::manager::Extractor;
use crate::resource::Resource;
use crate::value::{CanonicalRecord, MetaDataCollection, MetaValue};

/// Canonical field name to IIM dataset.
const FIELD_MAPPING: &[(&str, DataSet)] = &[
    ("City", iim_spec::CITY),
    ("Contact", iim_spec::CONTACT),
    ("CopyrightNotice", iim_spec::COPYRIGHT_NOTICE),
    ("Country", iim_spec::COUNTRY_PRIMARY_LOCATION_NAME),
    ("CountryCode", iim_spec::COUNTRY_PRIMARY_LOCATION_CODE),
    ("Creator", iim_spec::BYLINE),
    ("CreatorTitle", iim_spec::BYLINE_TITLE),
    ("CreditLine", iim_spec::CREDIT),
    ("Description", iim_spec::CAPTION_ABSTRACT),
    ("DescriptionWriter", iim_spec::WRITER_EDITOR),
    ("Headline", iim_spec::HEADLINE),
    ("Instructions", iim_spec::SPECIAL_INSTRUCTIONS),
    ("IntellectualGenres", iim_spec::OBJECT_ATTRIBUTE_REFERENCE),
    ("JobId", iim_spec::ORIGINAL_TRANSMISSION_REFERENCE),
    ("Keywords", iim_spec::KEYWORDS),
    ("Source", iim_spec::SOURCE),
    ("State", iim_spec::PROVINCE_STATE),
    ("SubjectCodes", iim_spec::SUBJECT_REFERENCE),
    ("Sublocation", iim_spec::SUBLOCATION),
    ("Title", iim_spec::OBJECT_NAME),
];

/// Timestamp field to its separate IIM date and time datasets.
/// DigitalCreationDate is sometimes used but not really specified in IIM.
const DATE_TIME_MAPPING: &[(&str, DataSet, DataSet)] = &[
    ("CreationDate", iim_spec::DATE_CREATED, iim_spec::TIME_CREATED),
    (
        "DigitalCreationDate",
        iim_spec::DIGITAL_CREATION_DATE,
        iim_spec::DIGITAL_CREATION_TIME,
    ),
];

/// Extracts IPTC metadata per the IIM 4.2 specification.
#[derive(Debug, Default)]
pub struct IptcIimExtractor;

impl IptcIimExtractor {
    pub const COMPATIBLE_MEDIA_TYPES: &'static [&'static str] = &[
        "application/octet-stream",
        "application/x-shockwave-flash",
        "image/bmp",
        "image/gif",
        "image/iff",
        "image/jp2",
        "image/jpeg",
        "image/png",
        "image/psd",
        "image/tiff",
        "image/vnd.microsoft.icon",
        "image/vnd.wap.wbmp",
        "image/xbm",
    ];

    pub fn new() -> Self {
        Self
    }
}

impl Extractor for IptcIimExtractor {
    fn name(&self) -> &'static str {
        "IPTC-IIM"
    }

    fn compatible_media_types(&self) -> &'static [&'static str] {
        Self::COMPATIBLE_MEDIA_TYPES
    }

    /// Reads the APP13 datasets out of the resource and stores the
    /// normalized record under the `iptc` domain key.
    fn extract(&self, resource: &Resource, collection: &mut MetaDataCollection) -> Result<()> {
        let bytes = resource.bytes()?;
        let datasets = decode::read_iim_datasets(&bytes).ok_or_else(|| ExtractError::NoData {
            identifier: resource.identifier().to_string(),
            kind: "IPTC",
        })?;

        collection.set("iptc", normalize(&IimProperties::from_datasets(datasets)));
        Ok(())
    }
}

/// Normalizes an IIM property store into the canonical record.
pub fn normalize(properties: &IimProperties) -> CanonicalRecord {
    let mut record = CanonicalRecord::new();

    for (field, data_set) in FIELD_MAPPING {
        if iim_spec::is_repeatable(*data_set) {
            record.set(*field, properties.repeated(*data_set));
        } else {
            record.set(*field, properties.single(*data_set));
        }
    }

    for (field, date_data_set, time_data_set) in DATE_TIME_MAPPING {
        let date = properties.single(*date_data_set);
        if date.is_empty() {
            continue;
        }
        let time = properties.single(*time_data_set);
        if let Some(timestamp) = convert::combine_iso8601(&date, &time) {
            record.set(*field, MetaValue::DateTimeTz(timestamp));
        }
    }

    reconcile_categories(properties, &mut record);

    record
}

/// Converts the deprecated (supplemental) category datasets.
///
/// Entries with a known alphabetic code become subject reference codes and
/// are merged into `SubjectCodes`; the rest land in `DeprecatedCategories`.
fn reconcile_categories(properties: &IimProperties, record: &mut CanonicalRecord) {
    let mut categories = properties.repeated(iim_spec::SUPPLEMENTAL_CATEGORY);
    categories.push(properties.single(iim_spec::CATEGORY));

    let mut subject_codes = Vec::new();
    let mut deprecated = Vec::new();
    for category in categories {
        if category.is_empty() {
            continue;
        }
        match iim_spec::category_to_subject_code(&category) {
            Some(code) => subject_codes.push(code.to_string()),
            None => deprecated.push(category),
        }
    }

    if !subject_codes.is_empty() {
        let mut merged: Vec<MetaValue> = record.list("SubjectCodes").to_vec();
        merged.extend(subject_codes.into_iter().map(MetaValue::Text));
        record.set("SubjectCodes", MetaValue::List(merged));
    }
    if !deprecated.is_empty() {
        record.set("DeprecatedCategories", deprecated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(datasets: Vec<(DataSet, &str)>) -> IimProperties {
        IimProperties::from_datasets(
            datasets
                .into_iter()
                .map(|(data_set, value)| (data_set, value.as_bytes().to_vec()))
                .collect(),
        )
    }

    #[test]
    fn fields_map_to_their_datasets() {
        let record = normalize(&store(vec![
            (iim_spec::OBJECT_NAME, "A title"),
            (iim_spec::CITY, "Dunedin"),
            (iim_spec::BYLINE, "Jane Doe"),
            (iim_spec::KEYWORDS, "snow"),
            (iim_spec::KEYWORDS, "winter"),
        ]));

        assert_eq!(record.text("Title"), "A title");
        assert_eq!(record.text("City"), "Dunedin");
        assert_eq!(record.texts("Creator"), vec!["Jane Doe"]);
        assert_eq!(record.texts("Keywords"), vec!["snow", "winter"]);
    }

    #[test]
    fn absent_fields_get_empty_defaults() {
        let record = normalize(&store(vec![]));

        assert_eq!(record.text("Headline"), "");
        assert!(record.list("Keywords").is_empty());
        assert!(record.contains("City"));
        assert!(!record.contains("CreationDate"));
    }

    #[test]
    fn creation_date_fuses_date_and_time() {
        let record = normalize(&store(vec![
            (iim_spec::DATE_CREATED, "20130918"),
            (iim_spec::TIME_CREATED, "105911+0200"),
        ]));

        let timestamp = record.timestamp_tz("CreationDate").unwrap();
        assert_eq!(timestamp.to_rfc3339(), "2013-09-18T10:59:11+02:00");
    }

    #[test]
    fn creation_date_without_time_defaults_to_midnight_utc() {
        let record = normalize(&store(vec![(iim_spec::DATE_CREATED, "20130918")]));

        let timestamp = record.timestamp_tz("CreationDate").unwrap();
        assert_eq!(timestamp.to_rfc3339(), "2013-09-18T00:00:00+00:00");
    }

    #[test]
    fn creation_date_requires_the_date_part() {
        let record = normalize(&store(vec![(iim_spec::TIME_CREATED, "105911")]));
        assert!(!record.contains("CreationDate"));
    }

    #[test]
    fn digital_creation_date_is_fused_too() {
        let record = normalize(&store(vec![
            (iim_spec::DIGITAL_CREATION_DATE, "20130918"),
            (iim_spec::DIGITAL_CREATION_TIME, "105911"),
        ]));

        let timestamp = record.timestamp_tz("DigitalCreationDate").unwrap();
        assert_eq!(timestamp.to_rfc3339(), "2013-09-18T10:59:11+00:00");
    }

    #[test]
    fn known_categories_become_subject_codes() {
        let record = normalize(&store(vec![
            (iim_spec::SUPPLEMENTAL_CATEGORY, "ACE"),
            (iim_spec::SUPPLEMENTAL_CATEGORY, "WAR"),
        ]));

        assert_eq!(record.texts("SubjectCodes"), vec!["01000000", "16000000"]);
        assert!(!record.contains("DeprecatedCategories"));
    }

    #[test]
    fn unknown_categories_land_in_the_deprecated_bucket() {
        let record = normalize(&store(vec![
            (iim_spec::SUPPLEMENTAL_CATEGORY, "XYZ"),
            (iim_spec::CATEGORY, "ACE"),
        ]));

        assert_eq!(record.texts("SubjectCodes"), vec!["01000000"]);
        assert_eq!(record.texts("DeprecatedCategories"), vec!["XYZ"]);
    }

    #[test]
    fn subject_codes_from_categories_merge_with_existing_ones() {
        let record = normalize(&store(vec![
            (iim_spec::SUBJECT_REFERENCE, "14025002"),
            (iim_spec::SUPPLEMENTAL_CATEGORY, "SPO"),
        ]));

        assert_eq!(record.texts("SubjectCodes"), vec!["14025002", "15000000"]);
    }

    #[test]
    fn empty_category_entries_are_ignored() {
        let record = normalize(&store(vec![(iim_spec::SUPPLEMENTAL_CATEGORY, "")]));

        assert!(record.list("SubjectCodes").is_empty());
        assert!(!record.contains("DeprecatedCategories"));
    }
}
