//! Summarize YouTube videos with a remote summarization service.
//!
//! The crate starts a summarization session for a video, polls the session
//! until it is done or stops producing new chapters, and saves the final
//! result as `<movie id>-summary.json`.
//!
//! ## Features
//! - Session start and status polling over HTTP.
//! - Bounded polling with a grace period and stagnation detection.
//! - Bare video ids or YouTube links as input.
//! - Typed error handling.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod movie;
pub mod output;
pub mod poller;
pub mod types;

pub use app::{summarize_movie, SummaryJob};
pub use client::SummaryClient;
pub use config::PollConfig;
pub use error::SummaryError;
pub use movie::MovieId;
pub use output::{summary_path, write_summary};
pub use poller::{PollState, SessionOutcome};
pub use types::{ExtraOpts, SessionResult, SessionStatus, SummarizeRequest};
