//! The capability implemented by every supported log shape.

use crate::{Error, Metadata, NormalizedRecord, RawLine, SkipReason};

/// The parameters extracted from a record, ready for reconstruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// A raw `key=value&key=value` query string.
    ///
    /// Goes through traffic-class suppression and is reconstructed as a flat
    /// query string.
    QueryString(String),

    /// Structured request metadata keyed by field name.
    ///
    /// Reconstructed as a path-plus-query request; suppression does not apply
    /// because there is no raw query string to test.
    Structured(Metadata),
}

/// A format adapter for one of the supported log shapes.
///
/// Adapters hold configuration only and no per-line state, so one adapter can
/// serve concurrent invocations of the pipeline.
pub trait FormatAdapter: Send + Sync {
    /// Converts one raw line into the normalized intermediate record.
    ///
    /// Missing fields become empty strings or `None`; only structurally
    /// invalid input is a hard failure.
    fn extract_record(&self, line: &RawLine<'_>) -> Result<NormalizedRecord, Error>;

    /// Checks that the record is an in-scope request for this filter.
    fn check_applicable(&self, record: &NormalizedRecord) -> Result<(), SkipReason>;

    /// Pulls the replay parameters out of the record.
    fn extract_parameters(&self, record: &NormalizedRecord) -> Result<Extraction, SkipReason>;

    /// The app identity stamped on emitted records.
    fn resolve_app(&self, record: &NormalizedRecord) -> String;

    /// The performance-test marker parameter for this deployment.
    fn perf_test_marker(&self) -> &str;
}
