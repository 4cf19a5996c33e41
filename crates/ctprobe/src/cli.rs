//! CLI argument structure using clap

use clap::Parser;
use ctprobe_core::{DEFAULT_TARGET, DEFAULT_TIMEOUT, ProbeConfig};
use std::time::Duration;
use url::Url;

#[derive(Parser)]
#[command(name = "ctprobe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Endpoint to probe
    #[arg(long, env = "CTPROBE_TARGET", default_value = DEFAULT_TARGET, value_parser = parse_target)]
    pub target: Url,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "CTPROBE_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Exit with status 2 when any probe fails
    #[arg(long)]
    pub fail_on_error: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> ProbeConfig {
        ProbeConfig::new(self.target.clone(), Duration::from_secs(self.timeout))
    }
}

fn parse_target(input: &str) -> Result<Url, String> {
    ProbeConfig::parse_target(input).map_err(|e| e.describe())
}
