//! Adapter for the suggestion service log shape.
//!
//! Lines carry their request context as a structured `mdc` object, e.g.
//! `{"mdc":{"requestType":"search","query":"cats","field":"title","rows":"5"}}`.
//! No string surgery is needed; the request is rebuilt as a path-plus-query
//! string from the metadata directly. The host may also hand over pre-split
//! fields with the `mdc` object still serialized, in which case only the
//! metadata blob is parsed.

use crate::{
    Error, Extraction, FormatAdapter, Metadata, NormalizedRecord, RawLine, SkipReason,
    SuggestFilterConfig,
};

/// Format adapter for the suggestion service's request log lines.
#[derive(Clone, Debug, Default)]
pub struct SuggestFormat {
    config: SuggestFilterConfig,
}

impl SuggestFormat {
    /// Creates the adapter for the given configuration.
    pub fn new(config: SuggestFilterConfig) -> Self {
        Self { config }
    }
}

/// Parses a serialized metadata blob.
///
/// Empty input and non-object JSON yield no metadata; only syntactically
/// invalid JSON is a hard failure.
fn parse_metadata(blob: &str) -> Result<Option<Metadata>, Error> {
    if blob.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(blob)?;
    match value {
        serde_json::Value::Object(object) => Ok(Some(super::metadata_from_object(&object))),
        _ => Ok(None),
    }
}

impl FormatAdapter for SuggestFormat {
    fn extract_record(&self, line: &RawLine<'_>) -> Result<NormalizedRecord, Error> {
        match line {
            RawLine::Text(text) => {
                let object = super::parse_object(text)?;
                let metadata = object
                    .get("mdc")
                    .and_then(|value| value.as_object())
                    .map(super::metadata_from_object);
                Ok(NormalizedRecord {
                    timestamp: super::str_field(&object, "@timestamp"),
                    service_name: None,
                    message: super::str_field(&object, "message"),
                    metadata,
                })
            }
            RawLine::Fields {
                timestamp,
                message,
                metadata,
                ..
            } => Ok(NormalizedRecord {
                timestamp: (*timestamp).to_owned(),
                service_name: None,
                message: (*message).to_owned(),
                metadata: parse_metadata(metadata)?,
            }),
        }
    }

    fn check_applicable(&self, record: &NormalizedRecord) -> Result<(), SkipReason> {
        let metadata = record
            .metadata
            .as_ref()
            .filter(|m| !m.is_empty())
            .ok_or(SkipReason::MissingMetadata)?;

        if !metadata.contains_key("requestType") {
            return Err(SkipReason::NotRequest);
        }

        match metadata.get("query") {
            Some(query) if !query.is_empty() => Ok(()),
            _ => Err(SkipReason::MissingQuery),
        }
    }

    fn extract_parameters(&self, record: &NormalizedRecord) -> Result<Extraction, SkipReason> {
        let metadata = record
            .metadata
            .as_ref()
            .ok_or(SkipReason::MissingMetadata)?;
        Ok(Extraction::Structured(metadata.clone()))
    }

    fn resolve_app(&self, _record: &NormalizedRecord) -> String {
        self.config.app.clone()
    }

    fn perf_test_marker(&self) -> &str {
        &self.config.perf_test_marker
    }
}
