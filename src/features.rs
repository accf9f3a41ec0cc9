//! Tallying an attribute over a GeoJSON-style feature collection.

use std::fmt;

use serde_json::Value;

use crate::{read_source, Error, FrequencyStore, Result};

/// Attribute read from `properties` when nothing else is configured.
pub const DEFAULT_ATTRIBUTE: &str = "user";

/// The two layouts a feature list can come in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FeatureContainer<'a> {
    /// `{ "features": [...] }`
    Flat(&'a [Value]),
    /// `{ "featureContainer": { "features": [...] } }`
    Nested(&'a [Value]),
}

impl<'a> FeatureContainer<'a> {
    /// Find the feature list in a document.
    ///
    /// A top-level `features` array wins. Anything else under `features`,
    /// including a missing field, sends the lookup to the nested layout.
    pub fn resolve(doc: &'a Value) -> Result<Self> {
        if let Some(Value::Array(features)) = doc.get("features") {
            return Ok(FeatureContainer::Flat(features));
        }

        match doc.get("featureContainer").and_then(|c| c.get("features")) {
            Some(Value::Array(features)) => {
                Ok(FeatureContainer::Nested(features))
            }
            _ => Err(Error::NoFeatureList),
        }
    }

    pub fn features(&self) -> &'a [Value] {
        match *self {
            FeatureContainer::Flat(features)
            | FeatureContainer::Nested(features) => features,
        }
    }
}

/// Reads a whole JSON document and counts `properties.<attribute>` of every
/// feature in it.
#[derive(Clone, Debug)]
pub struct FeatureParser {
    source_id: String,
    attribute: String,
    processed: usize,
}

impl FeatureParser {
    pub fn new(source_id: impl Into<String>) -> Self {
        FeatureParser {
            source_id: source_id.into(),
            attribute: DEFAULT_ATTRIBUTE.into(),
            processed: 0,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Number of features routed to a store so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Load the source and add every feature's attribute value to `store`.
    pub fn parse(&mut self, store: &mut FrequencyStore) -> Result<()> {
        log::debug!("parse: loading {:?}", self.source_id);
        let text = read_source(&self.source_id)?;
        let doc: Value =
            serde_json::from_str(&text).map_err(|e| Error::Decode {
                source_id: self.source_id.clone(),
                source: e,
            })?;
        self.parse_document(&doc, store)
    }

    /// Count features of an already decoded document.
    ///
    /// Stops at the first feature without the attribute. Features before it
    /// stay counted.
    pub fn parse_document(
        &mut self,
        doc: &Value,
        store: &mut FrequencyStore,
    ) -> Result<()> {
        let container = FeatureContainer::resolve(doc)?;
        log::debug!(
            "parse_document: {} features in {}",
            container.features().len(),
            match container {
                FeatureContainer::Flat(_) => "flat layout",
                FeatureContainer::Nested(_) => "featureContainer",
            }
        );

        for (index, feature) in container.features().iter().enumerate() {
            let key = self.key(index, feature)?;
            self.processed += 1;
            store.add(key);
        }

        Ok(())
    }

    fn key(&self, index: usize, feature: &Value) -> Result<String> {
        let Some(properties) = feature.get("properties") else {
            return Err(Error::AttributeAccess {
                index,
                path: "properties".into(),
            });
        };

        match properties.get(&self.attribute) {
            None | Some(Value::Null) => Err(Error::AttributeAccess {
                index,
                path: format!("properties.{}", self.attribute),
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            // Non-string values get keyed by their JSON text.
            Some(other) => Ok(other.to_string()),
        }
    }
}

impl fmt::Display for FeatureParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature Count: {}", self.processed)
    }
}
