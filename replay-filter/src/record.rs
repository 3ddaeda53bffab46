//! Input and output records of the filter pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

/// Structured per-request context extracted from a log line.
///
/// Either the `mdc` object of a JSON log line or the `key=value` tokens of a
/// tokenized message body. Duplicate keys overwrite in extraction order.
pub type Metadata = BTreeMap<String, String>;

/// One raw log line as handed over by the host framework.
///
/// Which variant arrives is a deployment decision: log shippers that forward
/// whole lines use [`RawLine::Text`], hosts that already split the envelope
/// use [`RawLine::Fields`].
#[derive(Clone, Copy, Debug)]
pub enum RawLine<'a> {
    /// UTF-8 text, expected to parse as a JSON object.
    Text(&'a str),

    /// Pre-split fields of the log envelope.
    Fields {
        /// When the line was logged.
        timestamp: &'a str,
        /// Application name listed in the envelope, possibly empty.
        app: &'a str,
        /// The free-text message body.
        message: &'a str,
        /// Serialized metadata object, or the empty string when absent.
        metadata: &'a str,
    },
}

/// The normalized intermediate record built once per line.
///
/// Built by [`FormatAdapter::extract_record`](crate::FormatAdapter::extract_record)
/// and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// When the line was logged, verbatim from the input.
    pub timestamp: String,

    /// The service identity carried by the line, if the format has one.
    pub service_name: Option<String>,

    /// The free-text message body.
    pub message: String,

    /// Structured request context, for formats that carry one.
    pub metadata: Option<Metadata>,
}

/// A reconstructed request ready to be re-issued by a load generator.
///
/// The sole successful output shape of the pipeline. `query` is either a
/// URL-encoded flat query string or a path-plus-query string, depending on the
/// source format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayQuery {
    /// Timestamp of the original request.
    pub timestamp: String,

    /// The application the request was served by.
    pub app: String,

    /// The reconstructed replay query.
    pub query: String,
}
