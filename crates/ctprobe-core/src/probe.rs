//! The four request-encoding probes

use crate::config::{ConductorPayload, PARAM_NAME, PARAM_VALUE, ProbeConfig};
use crate::error::{ProbeError, Result};
use crate::http::build_client;
use crate::report::Reporter;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::io::{self, Write};
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Identifies a probe; declaration order is execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    FormEncoded,
    JsonString,
    JsonNative,
    QueryParameter,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 4] = [
        ProbeKind::FormEncoded,
        ProbeKind::JsonString,
        ProbeKind::JsonNative,
        ProbeKind::QueryParameter,
    ];

    /// Section heading printed before the probe runs
    pub fn title(&self) -> &'static str {
        match self {
            ProbeKind::FormEncoded => "Probe 1: application/x-www-form-urlencoded (form body)",
            ProbeKind::JsonString => "Probe 2: application/json (pre-serialized JSON string)",
            ProbeKind::JsonNative => {
                "Probe 3: application/json (client json helper, Content-Type set automatically)"
            }
            ProbeKind::QueryParameter => "Probe 4: GET request (URL query parameters)",
        }
    }

    /// Name used in the summary table
    pub fn label(&self) -> &'static str {
        match self {
            ProbeKind::FormEncoded => "application/x-www-form-urlencoded (form)",
            ProbeKind::JsonString => "application/json (JSON string)",
            ProbeKind::JsonNative => "application/json (client json helper)",
            ProbeKind::QueryParameter => "GET (query parameters)",
        }
    }
}

/// What came back from one probe request
#[derive(Debug)]
pub struct ProbeExchange {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    /// Final request URL, including any query string
    pub url: Url,
    /// Content-Type the client put on the request, when the probe recorded it
    pub request_content_type: Option<String>,
}

impl ProbeExchange {
    fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.text().map_err(transport(&url))?;

        Ok(Self {
            status,
            headers,
            body,
            url,
            request_content_type: None,
        })
    }

    /// Exactly `200 OK`; any other status, 2xx included, is a failure
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// One request shape sent to the target
pub trait Probe {
    fn kind(&self) -> ProbeKind;

    /// Sends the request and reads the full response
    fn send(&self, client: &Client, target: &Url) -> Result<ProbeExchange>;

    /// Extra check on a `200 OK` exchange; `Some` is printed as the success payload
    fn verify(&self, _exchange: &ProbeExchange) -> Result<Option<String>> {
        Ok(None)
    }

    fn shows_request_url(&self) -> bool {
        false
    }
}

fn transport(url: &Url) -> impl FnOnce(reqwest::Error) -> ProbeError + '_ {
    move |source| ProbeError::from_request(url, source)
}

/// POST `conductor=1` with an explicit form Content-Type
pub struct FormEncodedProbe;

impl Probe for FormEncodedProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::FormEncoded
    }

    fn send(&self, client: &Client, target: &Url) -> Result<ProbeExchange> {
        let response = client
            .post(target.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(format!("{PARAM_NAME}={PARAM_VALUE}"))
            .send()
            .map_err(transport(target))?;

        ProbeExchange::read(response)
    }
}

/// POST a JSON string serialized up front, Content-Type set by hand
pub struct JsonStringProbe;

impl Probe for JsonStringProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::JsonString
    }

    fn send(&self, client: &Client, target: &Url) -> Result<ProbeExchange> {
        let body =
            serde_json::to_string(&ConductorPayload::default()).map_err(ProbeError::Serialize)?;

        let response = client
            .post(target.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(transport(target))?;

        ProbeExchange::read(response)
    }
}

/// POST through the client's `json()` helper and parse the JSON reply
pub struct JsonNativeProbe;

impl Probe for JsonNativeProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::JsonNative
    }

    fn send(&self, client: &Client, target: &Url) -> Result<ProbeExchange> {
        let request = client
            .post(target.clone())
            .json(&ConductorPayload::default())
            .build()
            .map_err(transport(target))?;

        let request_content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let response = client.execute(request).map_err(transport(target))?;

        let mut exchange = ProbeExchange::read(response)?;
        exchange.request_content_type = request_content_type;
        Ok(exchange)
    }

    fn verify(&self, exchange: &ProbeExchange) -> Result<Option<String>> {
        let value: serde_json::Value =
            serde_json::from_str(&exchange.body).map_err(ProbeError::InvalidJson)?;
        let pretty = serde_json::to_string_pretty(&value).map_err(ProbeError::Serialize)?;
        Ok(Some(pretty))
    }
}

/// GET with `conductor=1` in the query string
pub struct QueryParameterProbe;

impl Probe for QueryParameterProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::QueryParameter
    }

    fn send(&self, client: &Client, target: &Url) -> Result<ProbeExchange> {
        let response = client
            .get(target.clone())
            .query(&[(PARAM_NAME, PARAM_VALUE)])
            .send()
            .map_err(transport(target))?;

        ProbeExchange::read(response)
    }

    fn shows_request_url(&self) -> bool {
        true
    }
}

/// The four probes in execution order
pub fn standard_probes() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(FormEncodedProbe),
        Box::new(JsonStringProbe),
        Box::new(JsonNativeProbe),
        Box::new(QueryParameterProbe),
    ]
}

/// Sends one probe on its own client; the client is dropped on every path
fn exchange(probe: &dyn Probe, config: &ProbeConfig) -> Result<ProbeExchange> {
    let client = build_client(config)?;
    log::debug!("sending {:?} probe to {}", probe.kind(), config.target);
    probe.send(&client, &config.target)
}

/// Runs a probe, reports what happened and returns whether it succeeded
///
/// Probe failures (transport errors, non-200 status, unparsable JSON) are
/// printed and folded into `false`. Only a failure to write the report
/// itself is returned as an error.
pub fn run_probe<W: Write>(
    probe: &dyn Probe,
    config: &ProbeConfig,
    reporter: &mut Reporter<W>,
) -> io::Result<bool> {
    let kind = probe.kind();
    reporter.section(kind.title())?;

    let exchange = match exchange(probe, config) {
        Ok(exchange) => exchange,
        Err(e) => {
            log::warn!("{:?} probe failed: {}", kind, e.describe());
            reporter.error(&e)?;
            return Ok(false);
        }
    };

    if probe.shows_request_url() {
        reporter.field("Request URL", &exchange.url)?;
    }
    if let Some(content_type) = &exchange.request_content_type {
        reporter.field("Request Content-Type", content_type)?;
    }
    reporter.field("Status", exchange.status)?;
    reporter.headers("Response headers", &exchange.headers)?;
    reporter.field("Response body", &exchange.body)?;

    if !exchange.is_success() {
        log::debug!("{:?} probe got {}", kind, exchange.status);
        return Ok(false);
    }

    match probe.verify(&exchange) {
        Ok(Some(payload)) => reporter.json_success(&payload)?,
        Ok(None) => {}
        Err(e) => {
            log::warn!("{:?} probe response rejected: {}", kind, e.describe());
            reporter.error(&e)?;
            return Ok(false);
        }
    }

    Ok(true)
}
