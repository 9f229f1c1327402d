pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::store::schema::{ChallengeRecord, ExitReason, QuizHistory};

/// What a quiz session writes when it terminates.
pub trait SessionStore {
    fn append_quiz_history(&self, history: &QuizHistory) -> Result<()>;
    fn append_challenge_record(&self, record: &ChallengeRecord) -> Result<()>;
    /// `max(best persisted challenge score, current)`; never fails.
    fn challenge_best(&self, current: usize) -> usize;
    fn set_last_exit_reason(&self, reason: Option<ExitReason>) -> Result<()>;
}
