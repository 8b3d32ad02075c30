use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Options scoped to a single summarization session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraOpts {
    /// The session to query. Absent on the request that starts a session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Any further options forwarded to the service untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The body sent to the summarization endpoint.
///
/// The same payload starts a session and, once `extraOpts.sessionId` is set,
/// polls it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    /// Locator of the video to summarize.
    pub url: String,
    /// Language tag for the generated summary, e.g. "en".
    pub language: String,
    pub extra_opts: ExtraOpts,
}

impl SummarizeRequest {
    pub fn new(url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: language.into(),
            extra_opts: ExtraOpts::default(),
        }
    }

    /// Returns a copy of this request bound to `session_id`.
    pub fn with_session(&self, session_id: &str) -> Self {
        let mut request = self.clone();
        request.extra_opts.session_id = Some(session_id.to_string());
        request
    }
}

/// Lifecycle state reported by the summarization service.
///
/// Only `"pending"` and `"done"` are interpreted. Any other value, string or
/// not, is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SessionStatus {
    /// The service is still generating chapters.
    Pending,
    /// The summary is complete.
    Done,
    /// Any other state, kept verbatim.
    Other(Value),
}

impl From<Value> for SessionStatus {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("pending") => SessionStatus::Pending,
            Some("done") => SessionStatus::Done,
            _ => SessionStatus::Other(value),
        }
    }
}

impl From<SessionStatus> for Value {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Pending => Value::from("pending"),
            SessionStatus::Done => Value::from("done"),
            SessionStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Pending => f.write_str("pending"),
            SessionStatus::Done => f.write_str("done"),
            SessionStatus::Other(Value::String(value)) => f.write_str(value),
            SessionStatus::Other(value) => write!(f, "{}", value),
        }
    }
}

/// A snapshot of a summarization session as returned by the service.
///
/// Fields the crate does not interpret are kept in `extra`. A `null` in
/// `sessionId`, `status` or `chapters` reads the same as a missing field and
/// is not written back out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    /// The chapters generated so far, in order. Each record is opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionResult {
    pub fn is_done(&self) -> bool {
        self.status == Some(SessionStatus::Done)
    }

    /// The reported status, or an empty string when the service sent none.
    pub fn status_label(&self) -> String {
        self.status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.as_ref().map_or(0, Vec::len)
    }
}
