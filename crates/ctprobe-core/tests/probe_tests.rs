//! Integration tests for the probes against a mock target

use ctprobe_core::probe::{FormEncodedProbe, JsonNativeProbe, JsonStringProbe, QueryParameterProbe};
use ctprobe_core::{Probe, ProbeConfig, Reporter, run_probe};
use ctprobe_testkit::{MockTarget, silent_target, unreachable_target};
use std::time::{Duration, Instant};

/// Helper: Run one probe against `target`, returning the outcome and printed text
fn probe_once(probe: &dyn Probe, target: url::Url) -> (bool, String) {
    probe_with_timeout(probe, target, Duration::from_secs(5))
}

fn probe_with_timeout(probe: &dyn Probe, target: url::Url, timeout: Duration) -> (bool, String) {
    colored::control::set_override(false);
    let config = ProbeConfig::new(target, timeout);
    let mut reporter = Reporter::new(Vec::new());
    let success = run_probe(probe, &config, &mut reporter).expect("report write should not fail");
    let output = String::from_utf8(reporter.into_inner()).expect("report should be UTF-8");
    (success, output)
}

#[test]
fn test_form_probe_succeeds_on_200() {
    let mut target = MockTarget::new();
    let mock = target.form_post(200, "ok");

    let (success, output) = probe_once(&FormEncodedProbe, target.url());

    mock.assert();
    assert!(success);
    assert!(output.contains("Status: 200 OK"));
    assert!(output.contains("Response body: ok"));
}

#[test]
fn test_form_probe_fails_on_415() {
    let mut target = MockTarget::new();
    let mock = target.form_post(
        415,
        r#"{"code":"FST_ERR_CTP_INVALID_MEDIA_TYPE","message":"Unsupported Media Type"}"#,
    );

    let (success, output) = probe_once(&FormEncodedProbe, target.url());

    mock.assert();
    assert!(!success, "415 must be classified as failure");
    assert!(output.contains("Status: 415"));
    assert!(output.contains("FST_ERR_CTP_INVALID_MEDIA_TYPE"));
}

#[test]
fn test_only_200_counts_as_success() {
    for status in [201, 204, 404, 500] {
        let mut target = MockTarget::new();
        let mock = target.json_post(status, "");

        let (success, _) = probe_once(&JsonStringProbe, target.url());

        mock.assert();
        assert!(!success, "status {} must be classified as failure", status);
    }
}

#[test]
fn test_json_string_probe_sends_json_body() {
    let mut target = MockTarget::new();
    let mock = target.json_post(200, r#"{"ok":true}"#);

    let (success, output) = probe_once(&JsonStringProbe, target.url());

    mock.assert();
    assert!(success);
    assert!(
        !output.contains("Success! Response data"),
        "only the json helper probe pretty-prints the body"
    );
}

#[test]
fn test_json_native_probe_pretty_prints_response() {
    let mut target = MockTarget::new();
    let mock = target.json_post(200, r#"{"task":{"id":1,"name":"导体"}}"#);

    let (success, output) = probe_once(&JsonNativeProbe, target.url());

    mock.assert();
    assert!(success);
    assert!(output.contains("Request Content-Type: application/json"));
    assert!(output.contains("Success! Response data"));
    assert!(output.contains("\"name\": \"导体\""), "output: {}", output);
}

#[test]
fn test_json_native_probe_survives_malformed_200_body() {
    let mut target = MockTarget::new();
    let mock = target.json_post(200, "<html>definitely not json</html>");

    let (success, output) = probe_once(&JsonNativeProbe, target.url());

    mock.assert();
    assert!(!success, "malformed JSON on 200 must be a failure");
    assert!(output.contains("Status: 200 OK"));
    assert!(output.contains("INVALID_JSON"));
}

#[test]
fn test_json_native_probe_skips_parsing_on_error_status() {
    let mut target = MockTarget::new();
    let mock = target.json_post(500, "<html>boom</html>");

    let (success, output) = probe_once(&JsonNativeProbe, target.url());

    mock.assert();
    assert!(!success);
    assert!(!output.contains("INVALID_JSON"));
}

#[test]
fn test_query_probe_puts_parameter_in_url() {
    let mut target = MockTarget::new();
    let mock = target.query_get(200, "ok");

    let (success, output) = probe_once(&QueryParameterProbe, target.url());

    mock.assert();
    assert!(success);
    let url_line = output
        .lines()
        .find(|line| line.starts_with("Request URL: "))
        .expect("query probe should print the resolved URL");
    assert!(url_line.contains("conductor=1"), "line: {}", url_line);
    assert!(url_line.contains("/task_conductor?"));
}

#[test]
fn test_transport_failure_is_absorbed() {
    let (success, output) = probe_once(&FormEncodedProbe, unreachable_target());

    assert!(!success);
    assert!(output.contains("❌ Error:"));
    assert!(output.contains("TRANSPORT_FAILED"));
    assert!(
        output.contains("refused"),
        "error line should carry the underlying cause: {}",
        output
    );
    assert!(!output.contains("Status:"));
}

#[test]
fn test_timeout_is_absorbed() {
    let target = silent_target(Duration::from_secs(10));

    let started = Instant::now();
    let (success, output) =
        probe_with_timeout(&JsonNativeProbe, target, Duration::from_secs(1));
    let elapsed = started.elapsed();

    assert!(!success, "timed-out request must be a failure");
    assert!(
        elapsed < Duration::from_secs(5),
        "request should give up after the timeout, took {:?}",
        elapsed
    );
    assert!(output.contains("TIMEOUT"), "output: {}", output);
    assert!(output.contains("timed out"), "output: {}", output);
    assert!(!output.contains("Status:"));
}
