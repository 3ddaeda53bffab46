//! Utilities used by the format adapter tests.

/// Builds a Kubernetes-shipped scan service log line.
pub fn scan_line(service_name: &str, message: &str) -> String {
    serde_json::json!({
        "@timestamp": "2019-06-14T09:56:50.076+00:00",
        "message": message,
        "sys_kubernetes": {
            "labels": {
                "app": {
                    "kubernetes": {
                        "io/name": service_name,
                    }
                }
            }
        }
    })
    .to_string()
}

/// Builds a flat search-index access log line.
pub fn select_line(app: &str, message: &str) -> String {
    serde_json::json!({
        "timestamp": "T1",
        "app": app,
        "message": message,
    })
    .to_string()
}

/// Builds a suggestion service log line with the given `mdc` object.
pub fn suggest_line(mdc: serde_json::Value) -> String {
    serde_json::json!({
        "@timestamp": "2019-06-14T10:19:14.949+00:00",
        "message": "request performed",
        "mdc": mdc,
    })
    .to_string()
}
