//! Adapter for the search-index access log shape.
//!
//! Lines are flat JSON objects with `timestamp`, `app` and a `message` body of
//! whitespace-separated `key=value` tokens, e.g.
//! `path=/select params=[q=title:test&rows=10] status=0 QTime=3`. Only
//! `/select` requests with a non-empty parameter list are replayable.

use crate::{
    Error, Extraction, FormatAdapter, Metadata, NormalizedRecord, RawLine, SelectFilterConfig,
    SkipReason,
};

/// Format adapter for the search index's request log lines.
#[derive(Clone, Debug, Default)]
pub struct SelectAccessFormat {
    config: SelectFilterConfig,
}

impl SelectAccessFormat {
    /// Creates the adapter for the given configuration.
    pub fn new(config: SelectFilterConfig) -> Self {
        Self { config }
    }
}

/// Splits a message body into `key=value` tokens.
///
/// Tokens without `=` are ignored; the split is on the first `=` so values may
/// contain further equals signs. Later duplicates overwrite earlier ones.
fn tokenize(message: &str) -> Metadata {
    let mut parts = Metadata::new();
    for token in message.split_whitespace() {
        if let Some((key, value)) = token.split_once('=') {
            parts.insert(key.to_owned(), value.to_owned());
        }
    }
    parts
}

impl FormatAdapter for SelectAccessFormat {
    fn extract_record(&self, line: &RawLine<'_>) -> Result<NormalizedRecord, Error> {
        match line {
            RawLine::Text(text) => {
                let object = super::parse_object(text)?;
                let message = super::str_field(&object, "message");
                Ok(NormalizedRecord {
                    timestamp: super::str_field(&object, "timestamp"),
                    service_name: Some(super::str_field(&object, "app")),
                    metadata: Some(tokenize(&message)),
                    message,
                })
            }
            RawLine::Fields {
                timestamp,
                app,
                message,
                ..
            } => Ok(NormalizedRecord {
                timestamp: (*timestamp).to_owned(),
                service_name: Some((*app).to_owned()),
                message: (*message).to_owned(),
                metadata: Some(tokenize(message)),
            }),
        }
    }

    fn check_applicable(&self, record: &NormalizedRecord) -> Result<(), SkipReason> {
        let metadata = record
            .metadata
            .as_ref()
            .filter(|m| !m.is_empty())
            .ok_or(SkipReason::MissingMetadata)?;

        match metadata.get("path") {
            Some(path) if path == "/select" => {}
            _ => return Err(SkipReason::NotRequest),
        }

        match metadata.get("params") {
            Some(params) if !params.is_empty() => Ok(()),
            _ => Err(SkipReason::MissingQuery),
        }
    }

    fn extract_parameters(&self, record: &NormalizedRecord) -> Result<Extraction, SkipReason> {
        let params = record
            .metadata
            .as_ref()
            .and_then(|m| m.get("params"))
            .ok_or(SkipReason::MissingQuery)?;

        // The parameter list is wrapped in delimiters, `[...]` in practice.
        // Strip exactly the first and last character.
        let mut inner = params.chars();
        inner.next();
        inner.next_back();
        Ok(Extraction::QueryString(inner.as_str().to_owned()))
    }

    fn resolve_app(&self, record: &NormalizedRecord) -> String {
        record.service_name.clone().unwrap_or_default()
    }

    fn perf_test_marker(&self) -> &str {
        &self.config.perf_test_marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::select_line;
    use crate::{process, Decision};

    fn adapter() -> SelectAccessFormat {
        SelectAccessFormat::default()
    }

    #[test]
    fn test_tokenize_splits_on_first_equals() {
        let parts = tokenize("path=/select params=[q=a=b] ignored");
        assert_eq!(parts.get("path").unwrap(), "/select");
        assert_eq!(parts.get("params").unwrap(), "[q=a=b]");
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_tokenize_last_duplicate_wins() {
        let parts = tokenize("path=/old path=/select");
        assert_eq!(parts.get("path").unwrap(), "/select");
    }

    #[test]
    fn test_emits_replay_query() {
        replay_log::init_test!();

        let line = select_line("A1", "path=/select params=[q=title:test&rows=10]");
        let decision = process(&adapter(), &RawLine::Text(&line)).unwrap();
        let query = decision.emitted().expect("line should be emitted");
        assert_eq!(query.timestamp, "T1");
        assert_eq!(query.app, "A1");
        assert_eq!(query.query, "q=title:test&rows=10&dbcPerfTest=true");
    }

    #[test]
    fn test_skips_other_paths() {
        let line = select_line("A1", "path=/admin params=[q=x]");
        let decision = process(&adapter(), &RawLine::Text(&line)).unwrap();
        assert_eq!(decision, Decision::Skip(SkipReason::NotRequest));
    }

    #[test]
    fn test_skips_missing_or_empty_params() {
        for message in ["path=/select", "path=/select params="] {
            let line = select_line("A1", message);
            let decision = process(&adapter(), &RawLine::Text(&line)).unwrap();
            assert_eq!(
                decision,
                Decision::Skip(SkipReason::MissingQuery),
                "did not skip `{message}`"
            );
        }
    }

    #[test]
    fn test_suppresses_distributed_sub_queries() {
        let line = select_line("A1", "path=/select params=[distrib=false&q=x]");
        let decision = process(&adapter(), &RawLine::Text(&line)).unwrap();
        assert_eq!(decision, Decision::Skip(SkipReason::DistributedSubQuery));
    }

    #[test]
    fn test_suppresses_already_flagged_traffic() {
        let line = select_line("A1", "path=/select params=[q=x&dbcPerfTest=true]");
        let decision = process(&adapter(), &RawLine::Text(&line)).unwrap();
        assert_eq!(decision, Decision::Skip(SkipReason::AlreadyFlagged));
    }

    #[test]
    fn test_accepts_pre_split_fields() {
        let line = RawLine::Fields {
            timestamp: "T1",
            app: "A1",
            message: "path=/select params=[q=x]",
            metadata: "",
        };
        let query = process(&adapter(), &line).unwrap().emitted().unwrap();
        assert_eq!(query.query, "q=x&dbcPerfTest=true");
    }
}
