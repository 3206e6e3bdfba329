//! Quiz session state machine.
//!
//! ```text
//! Idle ──start──▶ CaseDisplayed ──select──▶ AnswerSelected ──submit──▶ Submitted
//!   ▲                                        │      ▲                     │
//!   │                                        └select┘                     │
//!   │                         CaseDisplayed ◀──────────next_case──────────┘
//!   └──────────────────────────── stop (from any state)
//! ```
//!
//! A rejected call returns an error and leaves state, selection and score as
//! they were.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use super::generator::{Case, CaseFilter, CaseGenerator};
use crate::anatomy::LesionId;
use crate::error::SessionError;
use crate::observability::metrics;

/// Quiz session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No quiz running.
    #[default]
    Idle,
    /// A case is shown and nothing is selected.
    CaseDisplayed,
    /// A case is shown and an option is selected.
    AnswerSelected,
    /// The answer was graded.
    Submitted,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::CaseDisplayed => write!(f, "case displayed"),
            Self::AnswerSelected => write!(f, "answer selected"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// Running score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Correct answers.
    pub correct: u32,
    /// Answers submitted.
    pub total: u32,
}

impl Score {
    /// Fraction answered correctly; `0.0` before the first answer.
    #[must_use]
    pub fn accuracy(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Result of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Whether the chosen option was the correct lesion.
    pub correct: bool,
    /// The option that was chosen.
    pub chosen: LesionId,
    /// The correct lesion.
    pub correct_answer: LesionId,
    /// Score after this answer.
    pub score: Score,
    /// Clinical description of the correct lesion.
    pub description: String,
}

/// One graded round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredRound {
    /// The correct lesion.
    pub lesion: LesionId,
    /// The option that was chosen.
    pub chosen: LesionId,
    /// Whether it was correct.
    pub correct: bool,
}

/// A quiz run: one case at a time, graded answers, a running score.
#[derive(Debug)]
pub struct QuizSession<R> {
    generator: CaseGenerator,
    filter: CaseFilter,
    rng: R,
    state: SessionState,
    case: Option<Case>,
    selection: Option<LesionId>,
    score: Score,
    history: Vec<AnsweredRound>,
}

impl<R: Rng> QuizSession<R> {
    /// Creates an idle session drawing cases with `filter` from `rng`.
    #[must_use]
    pub const fn new(generator: CaseGenerator, filter: CaseFilter, rng: R) -> Self {
        Self {
            generator,
            filter,
            rng,
            state: SessionState::Idle,
            case: None,
            selection: None,
            score: Score {
                correct: 0,
                total: 0,
            },
            history: Vec::new(),
        }
    }

    /// Starts the quiz with a zero score and shows the first case.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless idle, and
    /// `SessionError::Case` if no lesion passes the filter (the session stays
    /// idle).
    pub fn start(&mut self) -> Result<&Case, SessionError> {
        self.require("start", &[SessionState::Idle])?;

        let case = self.generator.generate_case(&self.filter, &mut self.rng)?;
        self.score = Score::default();
        self.history.clear();
        tracing::info!(
            categories = ?self.filter.categories,
            scope = %self.filter.scope,
            "quiz started"
        );
        Ok(self.show(case))
    }

    /// Selects `lesion`, replacing any earlier selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a case is shown and
    /// not yet submitted, and `SessionError::InvalidSelection` if `lesion` is
    /// not one of the current options.
    pub fn select_answer(&mut self, lesion: &str) -> Result<(), SessionError> {
        self.require(
            "select an answer",
            &[SessionState::CaseDisplayed, SessionState::AnswerSelected],
        )?;

        let option = self
            .case
            .as_ref()
            .and_then(|c| c.options.iter().find(|o| *o == lesion))
            .cloned()
            .ok_or_else(|| {
                SessionError::InvalidSelection(format!("'{lesion}' is not one of the options"))
            })?;

        self.selection = Some(option);
        self.state = SessionState::AnswerSelected;
        Ok(())
    }

    /// Grades the selected answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSelection` if nothing is selected and
    /// `SessionError::InvalidTransition` if no case is awaiting an answer.
    pub fn submit(&mut self) -> Result<Outcome, SessionError> {
        if self.state == SessionState::CaseDisplayed {
            return Err(SessionError::InvalidSelection(
                "no answer selected".to_string(),
            ));
        }
        self.require("submit", &[SessionState::AnswerSelected])?;

        let (Some(case), Some(chosen)) = (&self.case, &self.selection) else {
            return Err(SessionError::InvalidSelection(
                "no answer selected".to_string(),
            ));
        };

        let correct = *chosen == case.correct_lesion;
        let description = self
            .generator
            .catalog()
            .lesion(case.correct_lesion.as_str())
            .map(|l| l.description.clone())
            .unwrap_or_default();

        self.score.total += 1;
        if correct {
            self.score.correct += 1;
        }
        self.history.push(AnsweredRound {
            lesion: case.correct_lesion.clone(),
            chosen: chosen.clone(),
            correct,
        });
        metrics::record_answer(correct);
        tracing::debug!(
            lesion = %case.correct_lesion,
            chosen = %chosen,
            correct,
            score = %self.score,
            "answer submitted"
        );

        let outcome = Outcome {
            correct,
            chosen: chosen.clone(),
            correct_answer: case.correct_lesion.clone(),
            score: self.score,
            description,
        };
        self.state = SessionState::Submitted;
        Ok(outcome)
    }

    /// Replaces the graded case with a new one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the current case was
    /// submitted, and `SessionError::Case` if no case can be drawn.
    pub fn next_case(&mut self) -> Result<&Case, SessionError> {
        self.require("move to the next case", &[SessionState::Submitted])?;

        let case = self.generator.generate_case(&self.filter, &mut self.rng)?;
        Ok(self.show(case))
    }

    /// Ends the quiz from any state and returns the final score. The session
    /// is reset to idle with a zero score.
    pub fn stop(&mut self) -> Score {
        let score = self.score;
        if self.state != SessionState::Idle {
            tracing::info!(%score, accuracy = score.accuracy(), "quiz stopped");
        }
        self.state = SessionState::Idle;
        self.case = None;
        self.selection = None;
        self.score = Score::default();
        self.history.clear();
        score
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The case on screen, if any.
    #[must_use]
    pub const fn current_case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    /// The selected option, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&LesionId> {
        self.selection.as_ref()
    }

    /// Score so far.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Graded rounds of this run, oldest first.
    #[must_use]
    pub fn history(&self) -> &[AnsweredRound] {
        &self.history
    }

    /// The lesion filter cases are drawn with.
    #[must_use]
    pub const fn filter(&self) -> &CaseFilter {
        &self.filter
    }

    fn show(&mut self, case: Case) -> &Case {
        self.selection = None;
        self.state = SessionState::CaseDisplayed;
        self.case.insert(case)
    }

    fn require(&self, action: &'static str, allowed: &[SessionState]) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }
}
