//! The end-to-end flow behind the `summarize-movie` binary.

use crate::client::SummaryClient;
use crate::config::PollConfig;
use crate::error::SummaryError;
use crate::movie::MovieId;
use crate::output::write_summary;
use crate::types::SummarizeRequest;
use std::path::PathBuf;
use tracing::info;

/// One movie to summarize.
#[derive(Debug, Clone)]
pub struct SummaryJob {
    pub movie_id: MovieId,
    pub output_dir: PathBuf,
    pub language: String,
}

impl SummaryJob {
    pub fn request(&self) -> SummarizeRequest {
        SummarizeRequest::new(self.movie_id.watch_url(), self.language.as_str())
    }
}

/// Starts a session for `job`, polls it, and writes the final result.
///
/// Returns the path of the written summary, or `None` when polling never got a
/// result.
///
/// # Errors
///
/// Fails if the session cannot be started (including
/// `SummaryError::MissingSession`) or the summary file cannot be written.
/// Errors while polling are logged and do not abort the run.
pub async fn summarize_movie(
    client: &SummaryClient,
    job: &SummaryJob,
    poll: &PollConfig,
) -> Result<Option<PathBuf>, SummaryError> {
    info!(movie_id = %job.movie_id, language = %job.language, "starting video summarization");

    let request = job.request();
    let session_id = client.start_session(&request).await?;
    let outcome = client.wait_for_session(&request, &session_id, poll).await;
    info!(session_id = %session_id, outcome = outcome.label(), "polling finished");

    write_summary(outcome.result(), &job.output_dir, &job.movie_id).await
}

/// Resolves when the process receives SIGINT or, on Unix, SIGTERM.
///
/// Returns the name of the signal. Listeners are registered on the first poll
/// and removed when the future is dropped.
pub async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGINT");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
