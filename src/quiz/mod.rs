//! EMG localization quiz
//!
//! [`CaseGenerator`] draws randomized cases from the lesion catalog;
//! [`QuizSession`] runs them one at a time and keeps score. Randomness is
//! always injected by the caller.

pub mod generator;
pub mod session;

pub use generator::{ANSWER_OPTIONS, Case, CaseFilter, CaseGenerator};
pub use session::{AnsweredRound, Outcome, QuizSession, Score, SessionState};
