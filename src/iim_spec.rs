//! IPTC-IIM 4.2 dataset dictionary and property store
//!
//! Dataset identifiers per the IPTC Information Interchange Model 4.2
//! (IIMV4.2.pdf). The [`IimProperties`] store mirrors the quirks of IIM data
//! in the wild: repeatable datasets collect into lists, everything else takes
//! the first occurrence, and unmarked legacy 8-bit text is transcoded to
//! UTF-8 before any field is read.

use std::collections::BTreeMap;
use std::fmt;

/// IIM dataset identifier: record number and dataset number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataSet(pub u8, pub u8);

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:03}", self.0, self.1)
    }
}

// Envelope record
pub const DESTINATION: DataSet = DataSet(1, 5);
pub const PRODUCT_ID: DataSet = DataSet(1, 50);
pub const CODED_CHARACTER_SET: DataSet = DataSet(1, 90);

// Application record
pub const OBJECT_ATTRIBUTE_REFERENCE: DataSet = DataSet(2, 4);
pub const OBJECT_NAME: DataSet = DataSet(2, 5);
pub const SUBJECT_REFERENCE: DataSet = DataSet(2, 12);
pub const CATEGORY: DataSet = DataSet(2, 15);
pub const SUPPLEMENTAL_CATEGORY: DataSet = DataSet(2, 20);
pub const KEYWORDS: DataSet = DataSet(2, 25);
pub const CONTENT_LOCATION_CODE: DataSet = DataSet(2, 26);
pub const CONTENT_LOCATION_NAME: DataSet = DataSet(2, 27);
pub const SPECIAL_INSTRUCTIONS: DataSet = DataSet(2, 40);
pub const REFERENCE_SERVICE: DataSet = DataSet(2, 45);
pub const REFERENCE_DATE: DataSet = DataSet(2, 47);
pub const REFERENCE_NUMBER: DataSet = DataSet(2, 50);
pub const DATE_CREATED: DataSet = DataSet(2, 55);
pub const TIME_CREATED: DataSet = DataSet(2, 60);
pub const DIGITAL_CREATION_DATE: DataSet = DataSet(2, 62);
pub const DIGITAL_CREATION_TIME: DataSet = DataSet(2, 63);
pub const BYLINE: DataSet = DataSet(2, 80);
pub const BYLINE_TITLE: DataSet = DataSet(2, 85);
pub const CITY: DataSet = DataSet(2, 90);
pub const SUBLOCATION: DataSet = DataSet(2, 92);
pub const PROVINCE_STATE: DataSet = DataSet(2, 95);
pub const COUNTRY_PRIMARY_LOCATION_CODE: DataSet = DataSet(2, 100);
pub const COUNTRY_PRIMARY_LOCATION_NAME: DataSet = DataSet(2, 101);
pub const ORIGINAL_TRANSMISSION_REFERENCE: DataSet = DataSet(2, 103);
pub const HEADLINE: DataSet = DataSet(2, 105);
pub const CREDIT: DataSet = DataSet(2, 110);
pub const SOURCE: DataSet = DataSet(2, 115);
pub const COPYRIGHT_NOTICE: DataSet = DataSet(2, 116);
pub const CONTACT: DataSet = DataSet(2, 118);
pub const CAPTION_ABSTRACT: DataSet = DataSet(2, 120);
pub const WRITER_EDITOR: DataSet = DataSet(2, 122);

// Objectdata record
pub const SUBFILE: DataSet = DataSet(8, 10);

/// Datasets the IIM specification allows to repeat.
pub fn is_repeatable(data_set: DataSet) -> bool {
    matches!(
        data_set,
        DESTINATION
            | PRODUCT_ID
            | OBJECT_ATTRIBUTE_REFERENCE
            | SUBJECT_REFERENCE
            | SUPPLEMENTAL_CATEGORY
            | KEYWORDS
            | CONTENT_LOCATION_CODE
            | CONTENT_LOCATION_NAME
            | REFERENCE_SERVICE
            | REFERENCE_DATE
            | REFERENCE_NUMBER
            | BYLINE
            | BYLINE_TITLE
            | CONTACT
            | WRITER_EDITOR
            | SUBFILE
    )
}

/// Converts a deprecated alphabetic category code into the modern 8-digit
/// subject reference code. Unknown codes yield `None`.
pub fn category_to_subject_code(category: &str) -> Option<&'static str> {
    Some(match category {
        "ACE" => "01000000",
        "CLJ" => "02000000",
        "DIS" => "03000000",
        "FIN" => "04000000",
        "EDU" => "05000000",
        "EVN" => "06000000",
        "HTH" => "07000000",
        "HUM" => "08000000",
        "LAB" => "09000000",
        "LIF" => "10000000",
        "POL" => "11000000",
        "REL" => "12000000",
        "SCI" => "13000000",
        "SOI" => "14000000",
        "SPO" => "15000000",
        "WAR" => "16000000",
        "WEA" => "17000000",
        _ => return None,
    })
}

/// Parsed IIM property store.
///
/// Built once per extraction from the raw dataset occurrences of an APP13
/// segment. Accessors follow the IIM repeatability rules: repeatable
/// datasets yield every occurrence in order, all others the first one.
#[derive(Debug, Clone, Default)]
pub struct IimProperties {
    properties: BTreeMap<DataSet, Vec<String>>,
}

impl IimProperties {
    /// Builds the store from raw dataset occurrences.
    ///
    /// Sometimes data is encoded in an unmarked legacy 8-bit charset. When no
    /// coded-character-set dataset is present, every value that is not valid
    /// UTF-8 is reinterpreted as ISO-8859-1 and transcoded, before any field
    /// is read.
    pub fn from_datasets(datasets: Vec<(DataSet, Vec<u8>)>) -> Self {
        let charset_declared = datasets
            .iter()
            .any(|(data_set, _)| *data_set == CODED_CHARACTER_SET);

        let mut properties: BTreeMap<DataSet, Vec<String>> = BTreeMap::new();
        for (data_set, bytes) in datasets {
            let value = match std::str::from_utf8(&bytes) {
                Ok(text) => text.to_string(),
                Err(_) if !charset_declared => latin1_to_utf8(&bytes),
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            properties.entry(data_set).or_default().push(value);
        }

        Self { properties }
    }

    /// Single-valued dataset: the first occurrence, or `""` when absent.
    pub fn single(&self, data_set: DataSet) -> String {
        self.properties
            .get(&data_set)
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Repeatable dataset: all occurrences in order, empty when absent.
    pub fn repeated(&self, data_set: DataSet) -> Vec<String> {
        self.properties.get(&data_set).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

fn latin1_to_utf8(bytes: &[u8]) -> String {
    // ISO-8859-1 maps byte values 1:1 onto the first 256 code points
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_set_display_matches_iim_notation() {
        assert_eq!(CITY.to_string(), "2#090");
        assert_eq!(HEADLINE.to_string(), "2#105");
        assert_eq!(CODED_CHARACTER_SET.to_string(), "1#090");
    }

    #[test]
    fn repeatable_datasets_collect_all_occurrences() {
        let store = IimProperties::from_datasets(vec![
            (KEYWORDS, b"snow".to_vec()),
            (KEYWORDS, b"winter".to_vec()),
            (CITY, b"Dunedin".to_vec()),
        ]);

        assert_eq!(store.repeated(KEYWORDS), vec!["snow", "winter"]);
        assert_eq!(store.single(CITY), "Dunedin");
    }

    #[test]
    fn absent_datasets_yield_empty_defaults() {
        let store = IimProperties::from_datasets(vec![]);
        assert_eq!(store.single(HEADLINE), "");
        assert!(store.repeated(KEYWORDS).is_empty());
    }

    #[test]
    fn non_repeatable_dataset_takes_first_occurrence() {
        let store = IimProperties::from_datasets(vec![
            (CITY, b"first".to_vec()),
            (CITY, b"second".to_vec()),
        ]);
        assert_eq!(store.single(CITY), "first");
    }

    #[test]
    fn unmarked_latin1_text_is_transcoded() {
        // "Zürich" in ISO-8859-1, no coded-character-set dataset
        let store = IimProperties::from_datasets(vec![(CITY, b"Z\xFCrich".to_vec())]);
        assert_eq!(store.single(CITY), "Zürich");
    }

    #[test]
    fn valid_utf8_is_left_untouched() {
        let store = IimProperties::from_datasets(vec![(CITY, "Zürich".as_bytes().to_vec())]);
        assert_eq!(store.single(CITY), "Zürich");
    }

    #[test]
    fn category_table_is_complete() {
        for (code, subject) in [
            ("ACE", "01000000"),
            ("CLJ", "02000000"),
            ("DIS", "03000000"),
            ("FIN", "04000000"),
            ("EDU", "05000000"),
            ("EVN", "06000000"),
            ("HTH", "07000000"),
            ("HUM", "08000000"),
            ("LAB", "09000000"),
            ("LIF", "10000000"),
            ("POL", "11000000"),
            ("REL", "12000000"),
            ("SCI", "13000000"),
            ("SOI", "14000000"),
            ("SPO", "15000000"),
            ("WAR", "16000000"),
            ("WEA", "17000000"),
        ] {
            assert_eq!(category_to_subject_code(code), Some(subject));
        }
        assert_eq!(category_to_subject_code("XYZ"), None);
        assert_eq!(category_to_subject_code(""), None);
    }

    #[test]
    fn repeatable_set_matches_the_specification() {
        assert!(is_repeatable(KEYWORDS));
        assert!(is_repeatable(SUPPLEMENTAL_CATEGORY));
        assert!(is_repeatable(SUBJECT_REFERENCE));
        assert!(!is_repeatable(CITY));
        assert!(!is_repeatable(CATEGORY));
        assert!(!is_repeatable(DATE_CREATED));
    }
}
