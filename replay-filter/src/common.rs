//! Outcome and error types shared by all pipeline stages.

use std::fmt;

use crate::ReplayQuery;

/// Identifies which pipeline stage skipped a line for which reason.
///
/// The reason is used for diagnostics only; it is never surfaced to the output
/// stream. The names are stable kebab-case identifiers suitable for host-side
/// stats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SkipReason {
    /// The line does not carry the expected service identity.
    ServiceIdentity,

    /// The line has no (or non-object) structured metadata.
    MissingMetadata,

    /// The line is not a request log line at all (missing discriminator or
    /// wrong request path).
    NotRequest,

    /// The request is missing its query payload.
    MissingQuery,

    /// The message body contains no parameter block.
    NoParameterBlock,

    /// A fan-out sub-request of a distributed query; the parent request is
    /// recorded separately.
    DistributedSubQuery,

    /// The line already carries the performance-test marker and is itself
    /// replayed traffic.
    AlreadyFlagged,

    /// A recognized request line with an unhandled request type.
    UnknownRequestType,
}

impl SkipReason {
    /// Returns the string identifier of the skip reason.
    pub fn name(self) -> &'static str {
        match self {
            SkipReason::ServiceIdentity => "service-identity",
            SkipReason::MissingMetadata => "missing-metadata",
            SkipReason::NotRequest => "not-request",
            SkipReason::MissingQuery => "missing-query",
            SkipReason::NoParameterBlock => "no-parameter-block",
            SkipReason::DistributedSubQuery => "distributed-sub-query",
            SkipReason::AlreadyFlagged => "already-flagged",
            SkipReason::UnknownRequestType => "unknown-request-type",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A hard failure of the field extractor.
///
/// Only structural failures of the input are errors; every domain-level "this
/// line does not apply" condition is a [`SkipReason`] instead. The host is
/// expected to log the error and drop the line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not valid JSON.
    #[error("invalid JSON in log line")]
    Json(#[from] serde_json::Error),

    /// The input parsed, but the top-level value is not an object.
    #[error("log line is not a JSON object")]
    NotAnObject,
}

/// The outcome of processing one log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The line is a replayable request; emit the reconstructed query.
    Emit(ReplayQuery),

    /// The line is not replayable traffic for this filter.
    Skip(SkipReason),
}

impl Decision {
    /// Returns the emitted query, if any.
    pub fn emitted(self) -> Option<ReplayQuery> {
        match self {
            Decision::Emit(query) => Some(query),
            Decision::Skip(_) => None,
        }
    }

    /// Returns `true` if the line was skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Decision::Skip(_))
    }
}
