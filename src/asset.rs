//! Asset domain side-channel
//!
//! The host application knows things about an asset that no file format
//! carries: its title, caption, tag labels and the collections it belongs to.
//! That object graph is flattened into its own `asset` record so consumers
//! see one uniform collection.

use crate::resource::Resource;
use crate::value::CanonicalRecord;

/// Caller-supplied asset description.
#[derive(Debug, Clone)]
pub struct Asset {
    pub resource: Resource,
    pub identifier: String,
    pub title: String,
    pub caption: String,
    pub copyright_notice: String,
    pub collections: Vec<String>,
    pub tags: Vec<String>,
}

impl Asset {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            identifier: String::new(),
            title: String::new(),
            caption: String::new(),
            copyright_notice: String::new(),
            collections: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Flattens the asset into the canonical `asset` record.
    pub fn record(&self) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.set("Caption", self.caption.clone());
        record.set("Identifier", self.identifier.clone());
        record.set("Title", self.title.clone());
        record.set("FileName", self.resource.identifier().to_string());
        record.set("Collections", self.collections.clone());
        record.set("Tags", self.tags.clone());
        record.set("CopyrightNotice", self.copyright_notice.clone());
        record
    }
}
