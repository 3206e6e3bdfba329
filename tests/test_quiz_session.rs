mod common;

use rand::rngs::StdRng;

use plexus::anatomy::{Category, Region, RegionScope};
use plexus::error::{CaseError, SessionError};
use plexus::quiz::{CaseFilter, QuizSession, Score, SessionState};

fn session(filter: CaseFilter) -> QuizSession<StdRng> {
    QuizSession::new(common::generator(), filter, common::rng(7))
}

fn mixed() -> QuizSession<StdRng> {
    session(CaseFilter::all_categories(RegionScope::Mixed))
}

fn right_answer(session: &QuizSession<StdRng>) -> String {
    session.current_case().unwrap().correct_lesion.to_string()
}

fn wrong_answer(session: &QuizSession<StdRng>) -> String {
    let case = session.current_case().unwrap();
    case.options
        .iter()
        .find(|o| **o != case.correct_lesion)
        .unwrap()
        .to_string()
}

#[test]
fn start_shows_a_case_with_zero_score() {
    let mut session = mixed();
    assert_eq!(session.state(), SessionState::Idle);
    session.start().unwrap();
    assert_eq!(session.state(), SessionState::CaseDisplayed);
    assert_eq!(session.score(), Score::default());
    assert!(session.selection().is_none());
}

#[test]
fn correct_submit_counts_both() {
    let mut session = mixed();
    session.start().unwrap();
    session.select_answer(&right_answer(&session)).unwrap();
    let outcome = session.submit().unwrap();

    assert!(outcome.correct);
    assert_eq!(outcome.score, Score { correct: 1, total: 1 });
    assert!(!outcome.description.is_empty());
    assert_eq!(session.state(), SessionState::Submitted);
}

#[test]
fn incorrect_submit_counts_total_only() {
    let mut session = mixed();
    session.start().unwrap();
    let expected = right_answer(&session);
    session.select_answer(&wrong_answer(&session)).unwrap();
    let outcome = session.submit().unwrap();

    assert!(!outcome.correct);
    assert_eq!(outcome.correct_answer, expected.as_str());
    assert_eq!(outcome.score, Score { correct: 0, total: 1 });
}

#[test]
fn three_rounds_two_right_one_wrong() {
    let mut session = mixed();
    session.start().unwrap();

    for (round, right) in [true, false, true].into_iter().enumerate() {
        if round > 0 {
            session.next_case().unwrap();
        }
        let answer = if right {
            right_answer(&session)
        } else {
            wrong_answer(&session)
        };
        session.select_answer(&answer).unwrap();
        session.submit().unwrap();
    }

    assert_eq!(session.score(), Score { correct: 2, total: 3 });
    assert!((session.score().accuracy() - 2.0 / 3.0).abs() < 1e-9);
    let history: Vec<bool> = session.history().iter().map(|r| r.correct).collect();
    assert_eq!(history, [true, false, true]);
}

#[test]
fn empty_filter_leaves_session_idle() {
    let mut session = session(CaseFilter::new(vec![], RegionScope::Only(Region::Upper)));
    let err = session.start().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Case(CaseError::NoLesionAvailable { .. })
    ));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.current_case().is_none());
}

#[test]
fn selecting_a_non_option_is_rejected_without_side_effects() {
    let mut session = mixed();
    session.start().unwrap();
    let err = session.select_answer("Not a lesion").unwrap_err();
    assert!(matches!(err, SessionError::InvalidSelection(_)));
    assert_eq!(session.state(), SessionState::CaseDisplayed);
    assert!(session.selection().is_none());

    let option = right_answer(&session);
    session.select_answer(&option).unwrap();
    assert!(session.select_answer("Not a lesion").is_err());
    assert_eq!(session.selection().unwrap().as_str(), option);
    assert_eq!(session.state(), SessionState::AnswerSelected);
}

#[test]
fn lesion_outside_the_options_is_rejected() {
    let mut session = session(CaseFilter::new(
        vec![Category::Root],
        RegionScope::Only(Region::Lower),
    ));
    session.start().unwrap();
    let case = session.current_case().unwrap().clone();
    let outsider = common::catalog()
        .lesions()
        .lesions()
        .find(|l| !case.is_option(l.id.as_str()))
        .unwrap()
        .id
        .to_string();
    assert!(matches!(
        session.select_answer(&outsider),
        Err(SessionError::InvalidSelection(_))
    ));
}

#[test]
fn submit_without_selection_is_rejected() {
    let mut session = mixed();
    session.start().unwrap();
    let err = session.submit().unwrap_err();
    assert!(matches!(err, SessionError::InvalidSelection(_)));
    assert_eq!(session.score(), Score::default());
    assert_eq!(session.state(), SessionState::CaseDisplayed);
}

#[test]
fn wrong_state_calls_are_rejected() {
    let mut session = mixed();
    assert!(matches!(
        session.select_answer("C5 radiculopathy"),
        Err(SessionError::InvalidTransition { state: SessionState::Idle, .. })
    ));
    assert!(matches!(
        session.submit(),
        Err(SessionError::InvalidTransition { state: SessionState::Idle, .. })
    ));
    assert!(matches!(
        session.next_case(),
        Err(SessionError::InvalidTransition { state: SessionState::Idle, .. })
    ));

    session.start().unwrap();
    assert!(matches!(
        session.next_case(),
        Err(SessionError::InvalidTransition { state: SessionState::CaseDisplayed, .. })
    ));

    session.select_answer(&right_answer(&session)).unwrap();
    session.submit().unwrap();
    assert!(matches!(
        session.submit(),
        Err(SessionError::InvalidTransition { state: SessionState::Submitted, .. })
    ));
    assert_eq!(session.score().total, 1);
}

#[test]
fn next_case_clears_selection() {
    let mut session = mixed();
    session.start().unwrap();
    session.select_answer(&right_answer(&session)).unwrap();
    session.submit().unwrap();
    session.next_case().unwrap();
    assert_eq!(session.state(), SessionState::CaseDisplayed);
    assert!(session.selection().is_none());
    assert_eq!(session.score().total, 1);
}

#[test]
fn stop_then_restart_resets_score() {
    let mut session = mixed();
    session.start().unwrap();
    session.select_answer(&right_answer(&session)).unwrap();
    session.submit().unwrap();

    assert_eq!(session.stop(), Score { correct: 1, total: 1 });
    session.start().unwrap();
    assert_eq!(session.score(), Score::default());
    assert!(session.history().is_empty());
}
