use std::error::Error as StdError;
use thiserror::Error;
use url::Url;

/// Errors raised while preparing or sending a probe
///
/// Everything except [`ProbeError::Io`] is absorbed at the probe boundary and
/// turned into a failed outcome; I/O errors come from writing the report.
///
/// Messages name the failing step only; the cause lives in `source()`. Use
/// [`ProbeError::describe`] (or [`error_chain`]) to print both.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP client could not be constructed
    #[error("CLIENT_BUILD_FAILED")]
    ClientBuild(#[source] reqwest::Error),

    /// Request failed before a response was read (refused, DNS, TLS, ...)
    #[error("TRANSPORT_FAILED: request to {url} failed")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// No complete response within the configured timeout
    #[error("TIMEOUT: request to {url} timed out")]
    Timeout {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not valid JSON
    #[error("INVALID_JSON: response body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// Request payload could not be serialized
    #[error("SERIALIZE_FAILED")]
    Serialize(#[source] serde_json::Error),

    #[error("INVALID_TARGET: '{input}'")]
    InvalidTarget {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("UNSUPPORTED_SCHEME: '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("IO_ERROR")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Wraps a reqwest failure for `url`, keeping timeouts apart
    pub fn from_request(url: &Url, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ProbeError::Timeout {
                url: url.clone(),
                source,
            }
        } else {
            ProbeError::Transport {
                url: url.clone(),
                source,
            }
        }
    }

    /// Message followed by every underlying cause
    pub fn describe(&self) -> String {
        error_chain(self)
    }
}

/// Renders an error and its `source()` chain joined with `: `
///
/// A cause whose text already ends the rendered string is skipped, since
/// some errors repeat their source in their own message.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }

    rendered
}

pub type Result<T> = std::result::Result<T, ProbeError>;
