use crate::config::{PollConfig, API_KEY_ENV, DEFAULT_API_URL};
use crate::error::SummaryError;
use crate::poller::{PollState, SessionOutcome};
use crate::types::{SessionResult, SummarizeRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::env;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Path of the summarization endpoint, relative to the base URL.
const SUMMARIZE_PATH: &str = "generation";

/// The client for the video summarization service.
///
/// It holds the shared `reqwest::Client` and the base URL for all API requests.
/// It is cheap to clone.
#[derive(Clone)]
pub struct SummaryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SummaryClient {
    /// Creates a new `SummaryClient` pointed at the default service URL.
    ///
    /// The API key is optional. If `api_key` is `None`, the
    /// `SUMMARY_API_KEY` environment variable is used when set.
    ///
    /// # Errors
    ///
    /// - `SummaryError::InvalidApiKey` if the key cannot be sent as a header.
    /// - `SummaryError::RequestFailed` if the internal HTTP client fails to build.
    pub fn new(api_key: Option<String>) -> Result<Self, SummaryError> {
        Self::new_with_url(api_key, DEFAULT_API_URL)
    }

    /// Creates a new `SummaryClient` with a custom base URL.
    ///
    /// This is useful for testing or for connecting to a different deployment.
    ///
    /// # Errors
    ///
    /// - `SummaryError::InvalidApiKey` if the key cannot be sent as a header.
    /// - `SummaryError::RequestFailed` if the internal HTTP client fails to build.
    /// - `SummaryError::UrlParseFailed` if the provided `base_url` is invalid.
    pub fn new_with_url(api_key: Option<String>, base_url: &str) -> Result<Self, SummaryError> {
        let api_key = api_key.or_else(|| env::var(API_KEY_ENV).ok());

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| SummaryError::InvalidApiKey)?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        // `Url::join` drops the last segment unless the base ends with a slash.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Self { client, base_url })
    }

    /// Sends one summarization request and returns the session snapshot.
    ///
    /// Without `extraOpts.sessionId` the service starts a new session; with
    /// it, the service reports the progress of that session.
    pub async fn summarize_video(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SessionResult, SummaryError> {
        let url = self.base_url.join(SUMMARIZE_PATH)?;
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SummaryError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Starts a summarization session and returns its identifier.
    ///
    /// # Errors
    ///
    /// `SummaryError::MissingSession` if the service answered without a
    /// session id, plus any error from [`SummaryClient::summarize_video`].
    pub async fn start_session(&self, request: &SummarizeRequest) -> Result<String, SummaryError> {
        let result = self.summarize_video(request).await?;
        match result.session_id {
            Some(session_id) if !session_id.is_empty() => {
                info!(session_id = %session_id, "session started");
                Ok(session_id)
            }
            _ => Err(SummaryError::MissingSession),
        }
    }

    /// Polls a session until it is done, stops producing chapters, or the
    /// attempt ceiling in `poll` is reached.
    ///
    /// Failed requests are logged and count as an attempt. The outcome always
    /// carries the most relevant result; only [`SessionOutcome::Exhausted`] can
    /// come back empty, when no request succeeded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use movie_summary::{PollConfig, SummarizeRequest, SummaryClient};
    /// # #[tokio::main]
    /// # async fn main() -> anyhow::Result<()> {
    /// let client = SummaryClient::new(None)?;
    /// let request = SummarizeRequest::new("https://www.youtube.com/watch?v=abc123", "en");
    /// let session_id = client.start_session(&request).await?;
    /// let outcome = client
    ///     .wait_for_session(&request, &session_id, &PollConfig::default())
    ///     .await;
    /// println!("Polling ended as {}", outcome.label());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_session(
        &self,
        request: &SummarizeRequest,
        session_id: &str,
        poll: &PollConfig,
    ) -> SessionOutcome {
        let request = request.with_session(session_id);
        let mut state = PollState::new(poll.grace_rounds);

        info!(session_id, "monitoring session progress");
        while state.attempts() < poll.max_attempts {
            match self.summarize_video(&request).await {
                Ok(result) => {
                    info!(
                        attempt = state.attempts() + 1,
                        chapters = result.chapter_count(),
                        status = %result.status_label(),
                        "session status"
                    );
                    if let Some(outcome) = state.observe(result) {
                        if matches!(outcome, SessionOutcome::Stagnant(_)) {
                            warn!(session_id, "no new chapters detected, stopping monitoring");
                        }
                        return outcome;
                    }
                }
                Err(e) => {
                    warn!(
                        category = "poll",
                        attempt = state.attempts() + 1,
                        error = %e,
                        "error during session monitoring"
                    );
                }
            }

            state.complete_attempt();
            if state.attempts() < poll.max_attempts {
                debug!(delay = ?poll.interval, "waiting before next poll");
                sleep(poll.interval).await;
            }
        }

        info!(session_id, attempts = state.attempts(), "session monitoring completed");
        state.exhaust()
    }
}
