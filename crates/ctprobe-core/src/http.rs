//! HTTP client construction for probes

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use reqwest::blocking::Client;

/// User agent sent with every probe
pub const USER_AGENT: &str = concat!("ctprobe/", env!("CARGO_PKG_VERSION"));

/// Builds a single-use HTTP client for one probe
///
/// The client never goes through a proxy: `HTTP_PROXY`, `HTTPS_PROXY`,
/// `ALL_PROXY` and system proxy settings are ignored without touching the
/// process environment.
///
/// # Arguments
///
/// * `config` - Supplies the per-request timeout
///
/// # Errors
///
/// Returns error if client construction fails (e.g. TLS backend init)
pub fn build_client(config: &ProbeConfig) -> Result<Client> {
    log::debug!(
        "building client (timeout {:?}, proxies disabled)",
        config.timeout
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .no_proxy()
        .build()
        .map_err(ProbeError::ClientBuild)
}
