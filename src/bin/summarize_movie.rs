//! Summarize one YouTube video and save the result as JSON.
//!
//! Usage:
//!   summarize-movie <MOVIE_ID> [OUTPUT_DIR] [LANGUAGE]
//!
//! Settings are also read from the environment and from a `.env` file
//! (`SUMMARY_API_URL`, `SUMMARY_API_KEY`, `RUST_LOG`).

use clap::Parser;
use movie_summary::app::shutdown_signal;
use movie_summary::config::{
    API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_GRACE_ROUNDS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_POLL_INTERVAL_MS,
};
use movie_summary::{summarize_movie, MovieId, PollConfig, SummaryClient, SummaryJob};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "summarize-movie",
    version,
    about = "Summarize a YouTube video with a remote summarization service"
)]
struct Cli {
    /// YouTube video id or link
    movie_id: Option<String>,
    /// Directory the summary file is written to
    #[arg(default_value = ".")]
    output_dir: PathBuf,
    /// Language of the summary
    #[arg(default_value = "en")]
    language: String,
    /// Base URL of the summarization service
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Bearer token for the summarization service
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
    /// Maximum number of status requests
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    /// Delay between status requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
    /// Status rounds to observe before checking for stalled sessions
    #[arg(long, default_value_t = DEFAULT_GRACE_ROUNDS)]
    grace_rounds: u32,
}

impl Cli {
    fn poll_config(&self) -> PollConfig {
        PollConfig {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
            grace_rounds: self.grace_rounds,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let Some(raw_movie_id) = cli.movie_id.as_deref() else {
        error!(category = "args", "movie id is required");
        process::exit(1);
    };
    let movie_id = match MovieId::parse(raw_movie_id) {
        Ok(movie_id) => movie_id,
        Err(e) => {
            error!(category = "args", error = %e, "invalid movie id");
            process::exit(1);
        }
    };

    let client = SummaryClient::new_with_url(cli.api_key.clone(), &cli.api_url)?;
    let poll = cli.poll_config();
    let job = SummaryJob {
        movie_id,
        output_dir: cli.output_dir.clone(),
        language: cli.language.clone(),
    };

    tokio::select! {
        result = summarize_movie(&client, &job, &poll) => {
            if let Err(e) = result {
                error!(category = "summarize", error = %e, "error during summarization");
            }
        }
        signal = shutdown_signal() => {
            info!(signal, "process interrupted, exiting");
            process::exit(0);
        }
    }

    Ok(())
}
