//! Probe target and request parameters

use crate::error::{ProbeError, Result};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Endpoint probed when no target is supplied
pub const DEFAULT_TARGET: &str = "http://47.104.72.198:3000/task_conductor";

/// Per-request timeout (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the parameter every probe transmits
pub const PARAM_NAME: &str = "conductor";

/// Value of the parameter every probe transmits
pub const PARAM_VALUE: &str = "1";

/// JSON body sent by the JSON probes: `{"conductor":"1"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConductorPayload {
    pub conductor: String,
}

impl Default for ConductorPayload {
    fn default() -> Self {
        Self {
            conductor: PARAM_VALUE.to_string(),
        }
    }
}

/// Where and how long to probe
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub target: Url,
    pub timeout: Duration,
}

impl ProbeConfig {
    pub fn new(target: Url, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    /// Config for [`DEFAULT_TARGET`] with [`DEFAULT_TIMEOUT`]
    pub fn with_defaults() -> Result<Self> {
        Self::from_target_str(DEFAULT_TARGET, DEFAULT_TIMEOUT)
    }

    pub fn from_target_str(target: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::new(Self::parse_target(target)?, timeout))
    }

    /// Parses a target URL, accepting only `http` and `https`
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The input is not a valid absolute URL
    /// - The scheme is neither `http` nor `https`
    pub fn parse_target(input: &str) -> Result<Url> {
        let url = Url::parse(input).map_err(|source| ProbeError::InvalidTarget {
            input: input.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ProbeError::UnsupportedScheme(other.to_string())),
        }
    }
}
