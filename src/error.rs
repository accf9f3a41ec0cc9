use std::io;

use thiserror::Error;

/// Failures while loading a source or pulling keys out of it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read source {source_id:?}")]
    SourceLoad {
        source_id: String,
        #[source]
        source: io::Error,
    },
    #[error("source {source_id:?} is not valid JSON")]
    Decode {
        source_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no `features` or `featureContainer.features` array in document")]
    NoFeatureList,
    #[error("feature {index} has no `{path}`")]
    AttributeAccess { index: usize, path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
