//! Diagnosis rule over probe outcomes

use crate::probe::ProbeKind;
use crate::runner::ProbeResults;

/// A diagnosis derived from which probes succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// The client-helper JSON probe got a 200
    AcceptsJson,
    /// JSON failed but the query-parameter GET got a 200
    AcceptsQuery,
    /// The form-encoded probe failed
    MissingFormBody,
}

impl Conclusion {
    pub fn finding(&self) -> &'static str {
        match self {
            Conclusion::AcceptsJson => "server accepts JSON payloads (application/json)",
            Conclusion::AcceptsQuery => "server accepts query-parameter GET requests",
            Conclusion::MissingFormBody => {
                "server rejects application/x-www-form-urlencoded bodies"
            }
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Conclusion::AcceptsJson => "use JSON: send the parameters as a JSON body",
            Conclusion::AcceptsQuery => "use that instead: pass the parameters in the query string",
            Conclusion::MissingFormBody => {
                "server likely lacks form-url-encoded body parsing support \
                 (no form body parser registered in the server framework)"
            }
        }
    }

    pub fn is_positive(&self) -> bool {
        !matches!(self, Conclusion::MissingFormBody)
    }
}

/// Applies the diagnosis rule
///
/// JSON takes priority; the query-parameter finding is only reported when JSON
/// failed. A failed form probe is reported independently of both.
pub fn conclude(results: &ProbeResults) -> Vec<Conclusion> {
    let mut conclusions = Vec::new();

    if results.get(ProbeKind::JsonNative) == Some(true) {
        conclusions.push(Conclusion::AcceptsJson);
    } else if results.get(ProbeKind::QueryParameter) == Some(true) {
        conclusions.push(Conclusion::AcceptsQuery);
    }

    if results.get(ProbeKind::FormEncoded) == Some(false) {
        conclusions.push(Conclusion::MissingFormBody);
    }

    conclusions
}
