use wordgate::session::{
    ChallengeSetup, InputEdit, QuizEffect, QuizEvent, QuizSession, SessionParams, Termination,
};
use wordgate::store::json_store::JsonStore;
use wordgate::store::schema::ExitReason;
use wordgate::vocab::{Book, Unit, Vocab, VocabRepository};

fn catalog() -> VocabRepository {
    let entries = ["cat", "dog", "pig", "cow", "hen", "duck", "fish", "bird"]
        .iter()
        .map(|w| Vocab::new(w, &format!("{w}-意思"), "", Book::Grade4Down, Unit::Unit3))
        .collect();
    VocabRepository::from_entries(entries, Vec::new())
}

fn typed_params() -> SessionParams {
    SessionParams {
        selection: vec![(Book::Grade4Down, Unit::Unit3)],
        question_count: 8,
        seconds_per_question: 20,
        written_mode: false,
        challenge: None,
        seed: Some(3),
    }
}

fn challenge_params(catalog: &VocabRepository) -> SessionParams {
    SessionParams {
        selection: Vec::new(),
        question_count: 8,
        seconds_per_question: 20,
        written_mode: false,
        challenge: Some(ChallengeSetup {
            pool: catalog.all().to_vec(),
            level: Some("四年级下册".to_string()),
        }),
        seed: Some(5),
    }
}

fn store() -> (tempfile::TempDir, JsonStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn start(params: SessionParams, catalog: &VocabRepository, store: &JsonStore) -> QuizSession {
    QuizSession::new(params, catalog, Box::new(store.clone()), |_, _, _| {}).unwrap()
}

fn answer(session: &mut QuizSession, text: &str) -> Vec<QuizEffect> {
    session.dispatch(QuizEvent::Input(InputEdit::Clear));
    for ch in text.chars() {
        session.dispatch(QuizEvent::Input(InputEdit::Insert(ch)));
    }
    session.dispatch(QuizEvent::Submit)
}

fn answer_current(session: &mut QuizSession) -> Vec<QuizEffect> {
    let word = session.current_vocab().unwrap().word.clone();
    answer(session, &word)
}

fn outcome_of(effects: &[QuizEffect]) -> Option<(Termination, Option<usize>)> {
    effects.iter().find_map(|e| match e {
        QuizEffect::Finished(o) => Some((o.termination, o.challenge_best)),
        _ => None,
    })
}

#[test]
fn finished_round_is_readable_after_reopening_the_store() {
    let (dir, store) = store();
    let catalog = catalog();
    let mut session = start(typed_params(), &catalog, &store);
    for _ in 0..8 {
        answer_current(&mut session);
    }
    assert!(session.is_finished());

    let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let history = reopened.load_quiz_history();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_success);
    assert_eq!(history[0].correct_count, 8);
    assert_eq!(history[0].meanings.len(), 8);
    assert!(history[0].detail_text().starts_with("1. 【"));
    assert_eq!(reopened.take_last_exit_reason().unwrap(), None);
}

#[test]
fn user_exit_leaves_a_flag_that_is_read_once() {
    let (_dir, store) = store();
    let catalog = catalog();
    let mut session = start(typed_params(), &catalog, &store);
    session.dispatch(QuizEvent::RequestExit);
    let fx = session.dispatch(QuizEvent::Confirm(true));
    assert_eq!(outcome_of(&fx).map(|o| o.0), Some(Termination::UserExit));

    assert_eq!(store.take_last_exit_reason().unwrap(), Some(ExitReason::Exit));
    assert_eq!(store.take_last_exit_reason().unwrap(), None);
    assert_eq!(store.load_quiz_history().len(), 1);
}

#[test]
fn challenge_best_carries_across_sessions() {
    let (_dir, store) = store();
    let catalog = catalog();

    let mut first = start(challenge_params(&catalog), &catalog, &store);
    for _ in 0..3 {
        answer_current(&mut first);
    }
    let fx = answer(&mut first, "wrong");
    assert_eq!(outcome_of(&fx), Some((Termination::Failure, Some(3))));

    let mut second = start(challenge_params(&catalog), &catalog, &store);
    answer_current(&mut second);
    let fx = answer(&mut second, "wrong");
    assert_eq!(outcome_of(&fx), Some((Termination::Failure, Some(3))));

    let records = store.load_challenge_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].correct_count, 1);
    assert_eq!(records[1].correct_count, 3);
}
