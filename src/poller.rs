//! Bookkeeping for polling a summarization session.
//!
//! [`PollState`] decides, one observation at a time, whether a session has
//! finished, stopped producing new chapters, or should be polled again. The
//! network side lives in [`SummaryClient::wait_for_session`](crate::SummaryClient::wait_for_session).

use crate::types::SessionResult;
use serde_json::Value;

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The service reported the session as `done`.
    Done(SessionResult),
    /// The chapter list stopped changing after the grace period.
    Stagnant(SessionResult),
    /// The attempt ceiling was reached. Holds the last successful result, if any.
    Exhausted(Option<SessionResult>),
}

impl SessionOutcome {
    pub fn result(&self) -> Option<&SessionResult> {
        match self {
            SessionOutcome::Done(result) | SessionOutcome::Stagnant(result) => Some(result),
            SessionOutcome::Exhausted(result) => result.as_ref(),
        }
    }

    pub fn into_result(self) -> Option<SessionResult> {
        match self {
            SessionOutcome::Done(result) | SessionOutcome::Stagnant(result) => Some(result),
            SessionOutcome::Exhausted(result) => result,
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            SessionOutcome::Done(_) => "done",
            SessionOutcome::Stagnant(_) => "stagnant",
            SessionOutcome::Exhausted(_) => "exhausted",
        }
    }
}

/// Local state of one polling run.
#[derive(Debug)]
pub struct PollState {
    attempts: u32,
    grace_rounds: u32,
    previous_chapters: Option<Vec<Value>>,
    last_result: Option<SessionResult>,
}

impl PollState {
    pub fn new(grace_rounds: u32) -> Self {
        Self {
            attempts: 0,
            grace_rounds,
            previous_chapters: Some(Vec::new()),
            last_result: None,
        }
    }

    /// Number of attempts consumed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining_grace_rounds(&self) -> u32 {
        self.grace_rounds
    }

    /// Feeds a successful status response into the state.
    ///
    /// Returns the terminal outcome if polling should stop. Does not count the
    /// attempt; call [`PollState::complete_attempt`] afterwards.
    pub fn observe(&mut self, result: SessionResult) -> Option<SessionOutcome> {
        let stagnant = if self.grace_rounds == 0 {
            result.chapters == self.previous_chapters
        } else {
            self.grace_rounds -= 1;
            false
        };

        // `done` wins over stagnation observed in the same round.
        if result.is_done() {
            return Some(SessionOutcome::Done(result));
        }
        if stagnant {
            return Some(SessionOutcome::Stagnant(result));
        }

        self.previous_chapters = result.chapters.clone();
        self.last_result = Some(result);
        None
    }

    pub fn complete_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Ends the run after the attempt ceiling was reached.
    pub fn exhaust(self) -> SessionOutcome {
        SessionOutcome::Exhausted(self.last_result)
    }
}
