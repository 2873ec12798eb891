//! photometa - EXIF and IPTC-IIM metadata extraction for image assets
//!
//! Decodes the tag blocks embedded in image files and normalizes them into a
//! stable, typed schema: one canonical record per metadata domain (`asset`,
//! `exif`, `iptc`), collected per extraction run.
//!
//! The low-level wire formats are handled by external decoders (kamadak-exif
//! for the IFD tree, an APP13/8BIM scanner for IIM datasets); this crate's
//! core is the semantic normalization on top: rational and DMS conversion,
//! timestamp fragment fusion, bitfield and enumeration interpretation,
//! deprecated tag reconciliation and charset repair.
//!
//! ## Example
//!
//! ```rust,no_run
//! use photometa::ExtractionManager;
//!
//! # fn example() -> photometa::Result<()> {
//! let manager = ExtractionManager::new();
//! let collection = manager.extract_from_path("photo.jpg")?;
//!
//! if let Some(exif) = collection.get("exif") {
//!     println!("Aperture: f/{}", exif.float("FNumber"));
//!     println!("Camera: {}", exif.text("Model"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod convert;
pub mod decode;
pub mod error;
pub mod exif;
pub mod exif_spec;
pub mod iim_spec;
pub mod iptc;
pub mod manager;
pub mod resource;
pub mod value;

pub use asset::Asset;
pub use error::{ExtractError, Result};
pub use exif::ExifExtractor;
pub use iptc::IptcIimExtractor;
pub use manager::{ExtractionManager, Extractor, MissingExtractorPolicy};
pub use resource::Resource;
pub use value::{CanonicalRecord, MetaDataCollection, MetaValue, RawTagMap};
