pub mod countdown;
pub mod input;
pub mod pool;
pub mod quiz;

pub use input::{AnswerInput, InputEdit};
pub use quiz::{
    ChallengeSetup, MAX_HINTS, MAX_SUBMISSIONS, MAX_WRONG_WORDS, Phase, QuizEffect, QuizEvent,
    QuizSession, RoundOutcome, SessionError, SessionParams, Termination,
};
