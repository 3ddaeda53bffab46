//! Stand-alone host for the replay line filters.
//!
//! Reads access log lines from a file or stdin, runs every line through the
//! filter for the selected log shape and writes the surviving
//! `{timestamp, app, query}` records as JSON lines on stdout. In production
//! the filters are embedded in the log-shipping pipeline; this binary covers
//! ad-hoc use and offline reprocessing of archived logs.

mod cli;

use std::process;

pub fn main() {
    let exit_code = match cli::execute() {
        Ok(()) => 0,
        Err(err) => {
            replay_log::ensure_error(&err);
            1
        }
    };

    process::exit(exit_code);
}
