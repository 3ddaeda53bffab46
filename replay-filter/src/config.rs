//! Config structs for all format adapters.

use serde::{Deserialize, Serialize};

/// The canonical performance-test marker parameter.
///
/// Appended to every emitted query so replayed traffic can be told apart from
/// live traffic, and used to suppress lines that are themselves replays.
pub const DEFAULT_PERF_TEST_MARKER: &str = "dbcPerfTest=true";

fn default_marker() -> String {
    DEFAULT_PERF_TEST_MARKER.to_owned()
}

/// Configuration for the Kubernetes-labeled scan service filter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanFilterConfig {
    /// The exact service identity a line must carry to be considered.
    pub service_name: String,

    /// The performance-test marker parameter.
    pub perf_test_marker: String,
}

impl Default for ScanFilterConfig {
    fn default() -> Self {
        Self {
            service_name: "datawell-scan-service".to_owned(),
            perf_test_marker: default_marker(),
        }
    }
}

/// Configuration for the search-index access log filter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectFilterConfig {
    /// The performance-test marker parameter.
    pub perf_test_marker: String,
}

impl Default for SelectFilterConfig {
    fn default() -> Self {
        Self {
            perf_test_marker: default_marker(),
        }
    }
}

/// Configuration for the suggestion service filter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestFilterConfig {
    /// The app identity stamped on emitted records.
    ///
    /// The suggestion service logs no app name of its own, so the value is
    /// supplied per deployment and defaults to empty.
    pub app: String,

    /// The performance-test marker parameter.
    pub perf_test_marker: String,
}

impl Default for SuggestFilterConfig {
    fn default() -> Self {
        Self {
            app: String::new(),
            perf_test_marker: default_marker(),
        }
    }
}
