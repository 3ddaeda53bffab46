//! Reconstructs replayable search queries from production access log lines.
//!
//! Each invocation takes one raw log line, decides whether it represents a
//! replayable search request and, if so, emits a normalized
//! `{timestamp, app, query}` record for a load generator; every other line is
//! skipped with a diagnostic reason. Processing is stateless: one line in, at
//! most one record out, no shared mutable state between invocations.
//!
//! The pipeline runs the same five stages for every supported log shape:
//!
//! 1. field extraction into a [`NormalizedRecord`]
//! 2. applicability filtering (service identity, request discriminator)
//! 3. parameter extraction ([`Extraction`])
//! 4. traffic-class suppression (distributed sub-queries, already-replayed
//!    traffic)
//! 5. query reconstruction (tracking-id removal, performance-test marker
//!    injection, URL-encoding)
//!
//! The shapes themselves live in [`formats`]; everything format-specific is
//! behind the [`FormatAdapter`] trait.

#![warn(missing_docs)]

pub mod formats;

mod common;
mod config;
mod interface;
mod reconstruct;
mod record;
mod suppression;

#[cfg(test)]
mod testutils;

pub use crate::common::*;
pub use crate::config::*;
pub use crate::interface::*;
pub use crate::reconstruct::encode_uri;
pub use crate::record::*;

/// Runs one raw log line through the full filter pipeline.
///
/// Returns [`Decision::Emit`] with the reconstructed query for replayable
/// request lines and [`Decision::Skip`] for everything else. Only structurally
/// invalid input (broken JSON, wrong top-level type) is an `Err`; the host is
/// expected to log and drop such lines without aborting the batch.
pub fn process<F: FormatAdapter + ?Sized>(
    adapter: &F,
    line: &RawLine<'_>,
) -> Result<Decision, Error> {
    let record = adapter.extract_record(line)?;
    replay_log::trace!(
        "entering line filter, timestamp: {}, message: {}",
        record.timestamp,
        record.message
    );

    match reconstruct_query(adapter, &record) {
        Ok(query) => {
            replay_log::debug!("emitting replay query: {}", query.query);
            Ok(Decision::Emit(query))
        }
        Err(reason) => {
            if reason == SkipReason::UnknownRequestType {
                replay_log::error!("skipping line: {reason}");
            } else {
                replay_log::debug!("skipping line: {reason}");
            }
            Ok(Decision::Skip(reason))
        }
    }
}

/// The skip-or-emit core of the pipeline; every stage may terminate it early.
fn reconstruct_query<F: FormatAdapter + ?Sized>(
    adapter: &F,
    record: &NormalizedRecord,
) -> Result<ReplayQuery, SkipReason> {
    adapter.check_applicable(record)?;

    let query = match adapter.extract_parameters(record)? {
        Extraction::QueryString(raw) => {
            suppression::check(&raw, adapter.perf_test_marker())?;
            reconstruct::query_string(&raw, adapter.perf_test_marker())
        }
        Extraction::Structured(metadata) => reconstruct::request_path(&metadata)?,
    };

    Ok(ReplayQuery {
        timestamp: record.timestamp.clone(),
        app: adapter.resolve_app(record),
        query,
    })
}
