#![allow(dead_code)]

use movie_summary::{PollConfig, SummaryClient};
use serde_json::{json, Value};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Answers the session-starting request with `start` and status requests
/// with `polls`, one per call. The last poll response repeats once the list
/// runs out.
pub struct SessionResponder {
    start: ResponseTemplate,
    polls: Vec<ResponseTemplate>,
    poll_calls: AtomicUsize,
}

impl SessionResponder {
    pub fn new(start: ResponseTemplate, polls: Vec<ResponseTemplate>) -> Self {
        Self {
            start,
            polls,
            poll_calls: AtomicUsize::new(0),
        }
    }
}

impl wiremock::Respond for SessionResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !is_poll(request) {
            return self.start.clone();
        }
        let call = self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.polls
            .get(call)
            .or(self.polls.last())
            .cloned()
            .unwrap_or_else(|| ResponseTemplate::new(500))
    }
}

fn is_poll(request: &Request) -> bool {
    let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
    !body["extraOpts"]["sessionId"].is_null()
}

pub fn session(session_id: &str, status: &str, chapters: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "sessionId": session_id,
        "status": status,
        "chapters": chapters
    }))
}

pub async fn mount_session(server: &MockServer, responder: SessionResponder) {
    Mock::given(method("POST"))
        .and(path("/generation"))
        .respond_with(responder)
        .mount(server)
        .await;
}

/// Number of status requests (those carrying a session id) the server saw.
pub async fn poll_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| is_poll(request))
        .count()
}

pub fn client(server: &MockServer) -> SummaryClient {
    SummaryClient::new_with_url(Some("test_api_key".to_string()), &server.uri()).unwrap()
}

pub fn fast_poll(max_attempts: u32, grace_rounds: u32) -> PollConfig {
    PollConfig {
        max_attempts,
        interval: Duration::from_millis(10),
        grace_rounds,
    }
}

/// Log lines written by a subscriber installed with [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes tracing output on the current thread into a [`LogBuffer`] until the
/// guard is dropped. Works with the single-threaded `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
