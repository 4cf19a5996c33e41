//! Mock target server for probe tests
//!
//! Each [`MockTarget`] owns its own mockito server, so tests can run in
//! parallel without sharing mocks or environment variables.

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use url::Url;

/// Path every mock target serves, matching the real endpoint
pub const TARGET_PATH: &str = "/task_conductor";

/// A mockito server standing in for the probed endpoint
///
/// # Examples
///
/// ```no_run
/// use ctprobe_testkit::MockTarget;
///
/// let mut target = MockTarget::new();
/// let mock = target.accept_json(r#"{"ok":true}"#);
/// // ... run probes against target.url() ...
/// mock.assert();
/// ```
pub struct MockTarget {
    server: ServerGuard,
}

impl MockTarget {
    pub fn new() -> Self {
        Self {
            server: Server::new(),
        }
    }

    /// Full target URL (`http://127.0.0.1:<port>/task_conductor`)
    pub fn url(&self) -> Url {
        Url::parse(&format!("{}{}", self.server.url(), TARGET_PATH))
            .expect("mockito server URL should be valid")
    }

    /// POST with a form body `conductor=1`
    pub fn form_post(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", TARGET_PATH)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("conductor=1")
            .with_status(status)
            .with_body(body)
            .create()
    }

    /// POST with JSON body `{"conductor":"1"}`, expected once
    pub fn json_post(&mut self, status: usize, body: &str) -> Mock {
        self.json_post_times(status, body, 1)
    }

    fn json_post_times(&mut self, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", TARGET_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::JsonString(r#"{"conductor":"1"}"#.to_string()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create()
    }

    /// GET with query `conductor=1`
    pub fn query_get(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", TARGET_PATH)
            .match_query(Matcher::UrlEncoded("conductor".into(), "1".into()))
            .with_status(status)
            .with_body(body)
            .create()
    }

    /// Answers both JSON POST probes with `200` and `body`
    pub fn accept_json(&mut self, body: &str) -> Mock {
        self.json_post_times(200, body, 2)
    }
}

impl Default for MockTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// A target URL on a closed local port, for transport failures
pub fn unreachable_target() -> Url {
    Url::parse(&format!("http://127.0.0.1:1{}", TARGET_PATH))
        .expect("static URL should be valid")
}

/// A target that accepts the connection but never answers
///
/// The connection is held open for `hold`, so any request against the
/// returned URL can only end by timing out on the client side.
pub fn silent_target(hold: Duration) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind silent listener");
    let addr = listener.local_addr().expect("listener should have an address");

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });

    Url::parse(&format!("http://{}{}", addr, TARGET_PATH)).expect("listener URL should be valid")
}
