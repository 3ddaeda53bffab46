use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use replay_filter::formats::{ScanKubernetesFormat, SelectAccessFormat, SuggestFormat};
use replay_filter::{
    Decision, FormatAdapter, RawLine, ScanFilterConfig, SelectFilterConfig, SuggestFilterConfig,
};
use replay_log::{LogConfig, LogError};

/// The log shape produced by the source service.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Kubernetes-labeled scan service lines with a `RequestParam{...}` block.
    ScanK8s,
    /// Flat access log lines of `/select` requests against the search index.
    Select,
    /// Suggestion service lines carrying a structured `mdc` request context.
    Suggest,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Auto,
    Simplified,
    Json,
}

impl From<LogFormat> for replay_log::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Auto => replay_log::LogFormat::Auto,
            LogFormat::Simplified => replay_log::LogFormat::Simplified,
            LogFormat::Json => replay_log::LogFormat::Json,
        }
    }
}

/// Reads access log lines and emits replayable query records as JSON lines.
#[derive(Debug, Parser)]
#[command(name = "replay-recorder", version)]
struct Cli {
    /// Log shape of the input lines.
    #[arg(long, value_enum)]
    format: Format,

    /// Input file, or `-` for stdin.
    #[arg(long, default_value = "-")]
    input: String,

    /// Expected service identity (scan-k8s format only).
    #[arg(long)]
    service_name: Option<String>,

    /// App name stamped on emitted records (suggest format only).
    #[arg(long)]
    app: Option<String>,

    /// Performance-test marker parameter.
    #[arg(long)]
    marker: Option<String>,

    /// Diagnostic log level.
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,

    /// Diagnostic log format.
    #[arg(long, value_enum, default_value = "auto")]
    log_format: LogFormat,
}

impl Cli {
    fn adapter(&self) -> Box<dyn FormatAdapter> {
        match self.format {
            Format::ScanK8s => {
                let mut config = ScanFilterConfig::default();
                if let Some(service_name) = &self.service_name {
                    config.service_name = service_name.clone();
                }
                if let Some(marker) = &self.marker {
                    config.perf_test_marker = marker.clone();
                }
                Box::new(ScanKubernetesFormat::new(config))
            }
            Format::Select => {
                let mut config = SelectFilterConfig::default();
                if let Some(marker) = &self.marker {
                    config.perf_test_marker = marker.clone();
                }
                Box::new(SelectAccessFormat::new(config))
            }
            Format::Suggest => {
                let mut config = SuggestFilterConfig::default();
                if let Some(app) = &self.app {
                    config.app = app.clone();
                }
                if let Some(marker) = &self.marker {
                    config.perf_test_marker = marker.clone();
                }
                Box::new(SuggestFormat::new(config))
            }
        }
    }

    fn reader(&self) -> Result<Box<dyn BufRead>> {
        if self.input == "-" {
            return Ok(Box::new(io::stdin().lock()));
        }

        let file = File::open(&self.input)
            .with_context(|| format!("failed to open input file {}", self.input))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Runs the recorder until the input stream is exhausted.
pub fn execute() -> Result<()> {
    let cli = Cli::parse();
    replay_log::init(&LogConfig {
        level: cli.log_level,
        format: cli.log_format.into(),
    });

    let adapter = cli.adapter();
    let reader = cli.reader()?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let mut emitted = 0u64;
    let mut skipped = 0u64;
    let mut malformed = 0u64;

    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }

        // One bad line must never abort the batch.
        match replay_filter::process(&*adapter, &RawLine::Text(&line)) {
            Ok(Decision::Emit(query)) => {
                serde_json::to_writer(&mut output, &query)
                    .context("failed to serialize replay query")?;
                output
                    .write_all(b"\n")
                    .context("failed to write replay query")?;
                emitted += 1;
            }
            Ok(Decision::Skip(_)) => skipped += 1,
            Err(err) => {
                replay_log::error!("dropping malformed line: {}", LogError(&err));
                malformed += 1;
            }
        }
    }

    output.flush().context("failed to flush output")?;
    replay_log::info!("done, {emitted} emitted, {skipped} skipped, {malformed} malformed");
    Ok(())
}
