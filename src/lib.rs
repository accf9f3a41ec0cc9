use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
};

mod error;
pub use error::{Error, Result};

pub mod features;
pub use features::{FeatureContainer, FeatureParser};

pub mod lines;
pub use lines::LineParser;

mod store;
pub use store::FrequencyStore;

/// Source identifier that stands for standard input.
pub const STDIN: &str = "-";

/// Open a source for line-by-line reading.
pub fn open(source_id: &str) -> Result<Box<dyn BufRead>> {
    if source_id == STDIN {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(source_id).map_err(|e| Error::SourceLoad {
        source_id: source_id.into(),
        source: e,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read an entire source into memory.
pub fn read_source(source_id: &str) -> Result<String> {
    let mut text = String::new();
    open(source_id)?
        .read_to_string(&mut text)
        .map_err(|e| Error::SourceLoad {
            source_id: source_id.into(),
            source: e,
        })?;
    Ok(text)
}
