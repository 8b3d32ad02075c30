use std::time::Duration;

/// Base URL of the summarization service used when none is configured.
pub const DEFAULT_API_URL: &str = "https://300.ya.ru/api/";

/// Environment variable holding the service base URL.
pub const API_URL_ENV: &str = "SUMMARY_API_URL";

/// Environment variable holding an optional bearer token for the service.
pub const API_KEY_ENV: &str = "SUMMARY_API_KEY";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
pub const DEFAULT_GRACE_ROUNDS: u32 = 3;

/// Tuning for [`SummaryClient::wait_for_session`](crate::SummaryClient::wait_for_session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Upper bound on status requests, failed ones included.
    pub max_attempts: u32,
    /// Pause between two attempts.
    pub interval: Duration,
    /// Successful rounds observed before stagnation checks begin.
    pub grace_rounds: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            grace_rounds: DEFAULT_GRACE_ROUNDS,
        }
    }
}
