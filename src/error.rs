use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not read resource {identifier}")]
    UnreadableResource {
        identifier: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find {kind} data in {identifier}")]
    NoData {
        identifier: String,
        kind: &'static str,
    },

    #[error("No extractor available for media type {0}")]
    NoExtractor(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
