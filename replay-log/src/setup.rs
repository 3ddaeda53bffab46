use serde::{Deserialize, Serialize};

/// Controls the log format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// The default line-oriented format of the underlying logger.
    ///
    /// ```text
    /// [2020-12-04T12:10:32Z DEBUG replay_filter] skipping line: service-identity
    /// ```
    Auto,

    /// Simplified plain text output.
    ///
    /// ```text
    /// 2020-12-04T12:10:32Z [replay_filter] DEBUG: skipping line: service-identity
    /// ```
    Simplified,

    /// Dump out JSON lines.
    ///
    /// ```text
    /// {"timestamp":"2020-12-04T12:11:08Z","level":"DEBUG","logger":"replay_filter","message":"skipping line: service-identity"}
    /// ```
    Json,
}

/// Controls the logging system.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// The log level for the replay tools.
    pub level: log::LevelFilter,

    /// Controls the log output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            format: LogFormat::Auto,
        }
    }
}

/// Initializes the logging system for the given configuration.
///
/// The `RUST_LOG` environment variable still takes precedence over the
/// configured level, so individual modules can be turned up without a
/// configuration change.
#[cfg(feature = "init")]
pub fn init(config: &LogConfig) {
    use std::io::Write;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.level);
    builder.parse_default_env();

    match config.format {
        LogFormat::Auto => {}
        LogFormat::Simplified => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    buf.timestamp(),
                    record.target(),
                    record.level(),
                    record.args()
                )
            });
        }
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "timestamp": buf.timestamp().to_string(),
                    "level": record.level().to_string(),
                    "logger": record.target(),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{line}")
            });
        }
    }

    builder.init();
}
