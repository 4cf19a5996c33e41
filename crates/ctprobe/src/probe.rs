//! The probe run behind the `ctprobe` binary

use crate::cli::Cli;
use anyhow::{Context, Result};
use ctprobe_core::{ProbeRunner, Reporter};
use log::info;
use std::process::ExitCode;

/// Exit status when `--fail-on-error` is set and a probe failed
const PROBE_FAILURE_EXIT: u8 = 2;

/// Runs all probes and prints the report to stdout
///
/// # Returns
///
/// `ExitCode::SUCCESS` once the report is printed, whatever the probe
/// outcomes, unless `fail_on_error` is set.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.config();
    info!("probing {} (timeout {:?})", config.target, config.timeout);

    let runner = ProbeRunner::new(config);
    let results = runner
        .run(&mut Reporter::stdout())
        .context("failed to write probe report")?;

    if cli.fail_on_error && !results.all_succeeded() {
        return Ok(ExitCode::from(PROBE_FAILURE_EXIT));
    }

    Ok(ExitCode::SUCCESS)
}
