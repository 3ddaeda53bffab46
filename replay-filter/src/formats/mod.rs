//! Format adapters for the supported log shapes.
//!
//! Each adapter understands one way a source service lays out its log lines
//! and maps it onto the shared pipeline:
//!
//! * [`ScanKubernetesFormat`] — nested-label JSON with a Kubernetes service
//!   identity and a free-text parameter block.
//! * [`SelectAccessFormat`] — flat JSON whose message body is a sequence of
//!   `key=value` tokens describing a search-index request.
//! * [`SuggestFormat`] — JSON lines carrying a structured `mdc` request
//!   context, or the equivalent pre-split fields.

mod scan_kubernetes;
mod select_access;
mod suggest;

pub use self::scan_kubernetes::ScanKubernetesFormat;
pub use self::select_access::SelectAccessFormat;
pub use self::suggest::SuggestFormat;

use serde_json::{Map, Value};

use crate::{Error, Metadata};

/// Parses a raw line as a top-level JSON object.
fn parse_object(text: &str) -> Result<Map<String, Value>, Error> {
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject),
    }
}

/// Reads a top-level string field, empty when absent or not a string.
fn str_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Flattens a JSON object into string-valued metadata.
///
/// Non-string scalars keep their JSON rendering, so numeric `rows` values
/// survive as digit strings.
fn metadata_from_object(object: &Map<String, Value>) -> Metadata {
    object
        .iter()
        .map(|(key, value)| {
            let value = match value.as_str() {
                Some(s) => s.to_owned(),
                None => value.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}
