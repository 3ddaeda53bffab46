//! Adapter for the Kubernetes-labeled scan service log shape.
//!
//! Lines are JSON objects with `@timestamp`, a free-text `message` and the
//! service identity buried in the shipper's Kubernetes labels. The request
//! parameters sit inside the message as a `RequestParam{...}` block, the one
//! legacy case that still needs regex extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    Error, Extraction, FormatAdapter, NormalizedRecord, RawLine, ScanFilterConfig, SkipReason,
};

/// The parameter block the scan service writes into request log lines.
static REQUEST_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RequestParam\{.*\}").expect("invalid request param regex"));

/// Entry separator inside the parameter block.
static PARAM_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s+").expect("invalid separator regex"));

/// Format adapter for the scan service's Kubernetes-shipped log lines.
#[derive(Clone, Debug, Default)]
pub struct ScanKubernetesFormat {
    config: ScanFilterConfig,
}

impl ScanKubernetesFormat {
    /// Creates the adapter for the given configuration.
    pub fn new(config: ScanFilterConfig) -> Self {
        Self { config }
    }
}

/// Reads the service identity from the shipper's label path.
///
/// The shipper nests the label name `app.kubernetes.io/name` at its dots, so
/// the leaf key literally contains a slash.
fn kubernetes_name(object: &Map<String, Value>) -> Option<String> {
    object
        .get("sys_kubernetes")?
        .get("labels")?
        .get("app")?
        .get("kubernetes")?
        .get("io/name")?
        .as_str()
        .map(str::to_owned)
}

impl FormatAdapter for ScanKubernetesFormat {
    fn extract_record(&self, line: &RawLine<'_>) -> Result<NormalizedRecord, Error> {
        match line {
            RawLine::Text(text) => {
                let object = super::parse_object(text)?;
                Ok(NormalizedRecord {
                    timestamp: super::str_field(&object, "@timestamp"),
                    service_name: kubernetes_name(&object),
                    message: super::str_field(&object, "message"),
                    metadata: None,
                })
            }
            RawLine::Fields {
                timestamp,
                app,
                message,
                ..
            } => Ok(NormalizedRecord {
                timestamp: (*timestamp).to_owned(),
                service_name: (!app.is_empty()).then(|| (*app).to_owned()),
                message: (*message).to_owned(),
                metadata: None,
            }),
        }
    }

    fn check_applicable(&self, record: &NormalizedRecord) -> Result<(), SkipReason> {
        match record.service_name.as_deref() {
            Some(name) if !name.is_empty() && name == self.config.service_name => Ok(()),
            _ => Err(SkipReason::ServiceIdentity),
        }
    }

    fn extract_parameters(&self, record: &NormalizedRecord) -> Result<Extraction, SkipReason> {
        let block = REQUEST_PARAM
            .find(&record.message)
            .ok_or(SkipReason::NoParameterBlock)?
            .as_str();
        let entries = block
            .strip_prefix("RequestParam{")
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or(SkipReason::NoParameterBlock)?;

        let query_string = PARAM_SEPARATOR.replace_all(entries, "&").into_owned();
        Ok(Extraction::QueryString(query_string))
    }

    fn resolve_app(&self, _record: &NormalizedRecord) -> String {
        self.config.service_name.clone()
    }

    fn perf_test_marker(&self) -> &str {
        &self.config.perf_test_marker
    }
}
