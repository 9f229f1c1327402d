use std::collections::BTreeSet;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::session::countdown::{Countdown, TickOutcome};
use crate::session::input::{AnswerInput, InputEdit};
use crate::session::pool;
use crate::store::SessionStore;
use crate::store::schema::{ChallengeRecord, ExitReason, QuizHistory, UNANSWERED};
use crate::vocab::{Book, Unit, Vocab, VocabRepository};

/// Hints available over a whole session, not per question.
pub const MAX_HINTS: usize = 3;
/// Distinct wrong words that end a normal session as a failure.
pub const MAX_WRONG_WORDS: usize = 4;
/// Wrong submissions on one question before it is force-advanced.
pub const MAX_SUBMISSIONS: u32 = 3;
const HINT_PREFIX_CHARS: usize = 3;

const MSG_RETRY: &str = "错误，请重试！";
const MSG_TIMEOUT_SKIP: &str = "超时，自动进入下一题！";
const MSG_TOO_MANY_WRONG: &str = "错误超过3个单词，闯关失败！";
const MSG_CHALLENGE_WRONG: &str = "答错一个单词，挑战结束！";
const MSG_CHALLENGE_TIMEOUT: &str = "时间到，挑战结束！";
const MSG_CHALLENGE_QUIT: &str = "已退出挑战";
const MSG_CHALLENGE_DONE: &str = "挑战完成";
const MSG_QUIT: &str = "已退出闯关";

pub struct ChallengeSetup {
    /// Words to cycle through. Empty means the whole catalog.
    pub pool: Vec<Vocab>,
    pub level: Option<String>,
}

pub struct SessionParams {
    pub selection: Vec<(Book, Unit)>,
    pub question_count: usize,
    pub seconds_per_question: u32,
    pub written_mode: bool,
    pub challenge: Option<ChallengeSetup>,
    /// Fixed seed for reproducible question order.
    pub seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("所选单元中没有词汇")]
    EmptyPool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    /// One second of foreground time has passed.
    Tick,
    Input(InputEdit),
    Submit,
    /// Written mode: move on without grading.
    Next,
    Hint,
    /// Back navigation; asks for confirmation first.
    RequestExit,
    /// Answer to the last confirmation prompt.
    Confirm(bool),
    /// Written mode: the parent's manual score.
    SubmitScore(String),
    Activated,
    Deactivated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Success,
    Failure,
    UserExit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundOutcome {
    pub termination: Termination,
    pub correct_count: usize,
    pub total_count: usize,
    pub message: String,
    pub range_text: String,
    /// Challenge rounds only.
    pub challenge_best: Option<usize>,
    pub level: Option<String>,
}

impl RoundOutcome {
    pub fn is_success(&self) -> bool {
        self.termination == Termination::Success
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizEffect {
    Feedback(String),
    Shake,
    RevealPhonetic(String),
    ConfirmExit,
    ConfirmEndChallenge,
    /// (meaning, word) for every question, shown before grading.
    AnswerKey(Vec<(String, String)>),
    PromptScore,
    ExitControlVisible,
    Finished(RoundOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    AwaitingScore,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingConfirm {
    Exit,
    EndChallenge,
}

struct ChallengeState {
    source: Vec<Vocab>,
    extras: Vec<Vocab>,
    level: Option<String>,
    failed: Option<Vocab>,
}

type RoundFinished = Box<dyn FnMut(bool, usize, usize)>;

pub struct QuizSession {
    quiz_list: Vec<Vocab>,
    challenge: Option<ChallengeState>,
    written: bool,
    seconds_per_question: u32,

    current_index: usize,
    hint_used: bool,
    total_hints: usize,
    wrong_indexes: BTreeSet<usize>,
    correct_count: usize,
    submit_count: u32,
    user_answers: Vec<String>,

    countdown: Countdown,
    input: AnswerInput,
    feedback: String,
    phonetic: Option<String>,

    phase: Phase,
    finished: bool,
    /// One-shot termination guard.
    navigating_away: bool,
    /// Foreground/background events are only honoured while attached.
    lifecycle_attached: bool,
    pending_confirm: Option<PendingConfirm>,

    store: Box<dyn SessionStore>,
    on_finished: Option<RoundFinished>,
    rng: SmallRng,
}

impl QuizSession {
    pub fn new(
        params: SessionParams,
        catalog: &VocabRepository,
        store: Box<dyn SessionStore>,
        on_finished: impl FnMut(bool, usize, usize) + 'static,
    ) -> Result<Self, SessionError> {
        let mut rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let (quiz_list, challenge) = match params.challenge {
            Some(setup) => {
                let source = if setup.pool.is_empty() {
                    catalog.all().to_vec()
                } else {
                    setup.pool
                };
                let extras = catalog.extras().to_vec();
                let mut queue = Vec::with_capacity(source.len());
                pool::append_challenge_batch(&mut queue, &source, &extras, &mut rng);
                let state = ChallengeState {
                    source,
                    extras,
                    level: setup.level,
                    failed: None,
                };
                (queue, Some(state))
            }
            None => {
                let quiz = pool::assemble_quiz(
                    catalog,
                    &params.selection,
                    params.question_count,
                    &mut rng,
                );
                (quiz, None)
            }
        };

        if quiz_list.is_empty() {
            return Err(SessionError::EmptyPool);
        }

        let written = params.written_mode && challenge.is_none();
        let mut session = Self {
            quiz_list,
            challenge,
            written,
            seconds_per_question: params.seconds_per_question,
            current_index: 0,
            hint_used: false,
            total_hints: 0,
            wrong_indexes: BTreeSet::new(),
            correct_count: 0,
            submit_count: 0,
            user_answers: Vec::new(),
            countdown: Countdown::default(),
            input: AnswerInput::new(),
            feedback: String::new(),
            phonetic: None,
            phase: Phase::Active,
            finished: false,
            navigating_away: false,
            lifecycle_attached: false,
            pending_confirm: None,
            store,
            on_finished: Some(Box::new(on_finished)),
            rng,
        };

        tracing::info!(
            questions = session.quiz_list.len(),
            written = session.written,
            challenge = session.challenge.is_some(),
            "quiz session started"
        );

        let mut effects = Vec::new();
        session.show_current_question(&mut effects);
        Ok(session)
    }

    /// Single entry point for every input and lifecycle event.
    pub fn dispatch(&mut self, event: QuizEvent) -> Vec<QuizEffect> {
        let mut fx = Vec::new();
        match event {
            QuizEvent::Tick => self.on_tick(&mut fx),
            QuizEvent::Input(edit) => {
                if self.phase == Phase::Active && !self.written {
                    self.input.apply(edit);
                }
            }
            QuizEvent::Submit => self.on_submit(&mut fx),
            QuizEvent::Next => self.on_next(&mut fx),
            QuizEvent::Hint => self.on_hint(&mut fx),
            QuizEvent::RequestExit => self.on_request_exit(&mut fx),
            QuizEvent::Confirm(yes) => self.on_confirm(yes, &mut fx),
            QuizEvent::SubmitScore(text) => self.on_submit_score(&text, &mut fx),
            QuizEvent::Activated => self.on_activated(&mut fx),
            QuizEvent::Deactivated => {
                if self.lifecycle_attached {
                    self.countdown.pause();
                }
            }
        }
        fx
    }

    // ----- queries for the presentation layer -----

    pub fn current_vocab(&self) -> Option<&Vocab> {
        if self.finished {
            return None;
        }
        self.quiz_list.get(self.current_index)
    }

    /// e.g. "3. 铅笔"
    pub fn prompt(&self) -> Option<String> {
        self.current_vocab()
            .map(|v| format!("{}. {}", self.current_index + 1, v.meaning))
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn quiz_len(&self) -> usize {
        self.quiz_list.len()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn phonetic(&self) -> Option<&str> {
        self.phonetic.as_deref()
    }

    pub fn hint_available(&self) -> bool {
        !self.finished && !self.hint_used && self.total_hints < MAX_HINTS
    }

    pub fn total_hints(&self) -> usize {
        self.total_hints
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong_indexes.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    pub fn is_challenge(&self) -> bool {
        self.challenge.is_some()
    }

    pub fn level(&self) -> Option<&str> {
        self.challenge.as_ref().and_then(|c| c.level.as_deref())
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_confirm.is_some()
    }

    // ----- question flow -----

    fn show_current_question(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.finished {
            return;
        }
        if self.current_index >= self.quiz_list.len() {
            if let Some(ch) = self.challenge.as_ref() {
                pool::append_challenge_batch(&mut self.quiz_list, &ch.source, &ch.extras, &mut self.rng);
                tracing::debug!(queue = self.quiz_list.len(), "challenge pool regenerated");
            }
            if self.current_index >= self.quiz_list.len() {
                self.on_exhausted(fx);
                return;
            }
        }

        self.feedback.clear();
        self.phonetic = None;
        self.hint_used = false;
        self.submit_count = 0;
        self.input.clear();
        self.countdown.start(self.seconds_per_question);
        self.lifecycle_attached = true;
    }

    fn advance(&mut self, fx: &mut Vec<QuizEffect>) {
        self.current_index += 1;
        self.show_current_question(fx);
    }

    fn set_answer(&mut self, idx: usize, answer: &str) {
        if self.user_answers.len() <= idx {
            self.user_answers.resize(idx + 1, String::new());
        }
        self.user_answers[idx] = answer.to_string();
    }

    fn ensure_placeholder(&mut self, idx: usize) {
        let blank = self
            .user_answers
            .get(idx)
            .is_none_or(|a| a.trim().is_empty());
        if blank {
            self.set_answer(idx, UNANSWERED);
        }
    }

    /// Counts a wrong word once per question. Returns true when the cap is hit.
    fn mark_wrong(&mut self, idx: usize) -> bool {
        self.wrong_indexes.insert(idx);
        self.wrong_indexes.len() >= MAX_WRONG_WORDS
    }

    fn on_tick(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.finished {
            return;
        }
        if self.countdown.tick() == TickOutcome::Expired {
            self.on_timeout(fx);
        }
    }

    fn on_timeout(&mut self, fx: &mut Vec<QuizEffect>) {
        let idx = self.current_index;
        self.ensure_placeholder(idx);

        if self.challenge.is_some() {
            self.record_challenge_miss();
            self.terminate(Termination::Failure, self.correct_count, MSG_CHALLENGE_TIMEOUT, fx);
            return;
        }
        if self.written {
            self.advance(fx);
            return;
        }
        if self.mark_wrong(idx) {
            self.terminate(Termination::Failure, self.correct_count, MSG_TOO_MANY_WRONG, fx);
            return;
        }
        fx.push(QuizEffect::Feedback(MSG_TIMEOUT_SKIP.to_string()));
        self.advance(fx);
    }

    fn on_submit(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.finished || self.written {
            return;
        }
        let Some(expected) = self.quiz_list.get(self.current_index).map(|v| v.word.clone()) else {
            return;
        };
        let idx = self.current_index;
        let answer = self.input.value().trim().to_string();
        self.set_answer(idx, &answer);
        self.submit_count += 1;

        if answer.to_lowercase() == expected.to_lowercase() {
            self.countdown.pause();
            self.correct_count += 1;
            self.advance(fx);
            return;
        }

        if self.challenge.is_some() {
            self.record_challenge_miss();
            self.terminate(Termination::Failure, self.correct_count, MSG_CHALLENGE_WRONG, fx);
            return;
        }

        if self.submit_count < MAX_SUBMISSIONS {
            self.feedback = MSG_RETRY.to_string();
            fx.push(QuizEffect::Feedback(MSG_RETRY.to_string()));
            fx.push(QuizEffect::Shake);
            return;
        }

        self.countdown.pause();
        if self.mark_wrong(idx) {
            self.terminate(Termination::Failure, self.correct_count, MSG_TOO_MANY_WRONG, fx);
            return;
        }
        self.advance(fx);
    }

    fn on_next(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.finished || !self.written {
            return;
        }
        self.countdown.pause();
        self.ensure_placeholder(self.current_index);
        self.advance(fx);
    }

    fn on_hint(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.challenge.is_some() {
            if self.navigating_away || self.pending_confirm.is_some() {
                return;
            }
            self.pending_confirm = Some(PendingConfirm::EndChallenge);
            fx.push(QuizEffect::ConfirmEndChallenge);
            return;
        }
        if !self.hint_available() {
            return;
        }
        let Some(vocab) = self.quiz_list.get(self.current_index) else {
            return;
        };

        if self.written {
            let text = if vocab.phonetic.trim().is_empty() {
                "无音标".to_string()
            } else {
                format!("音标：{}", vocab.phonetic)
            };
            self.phonetic = Some(text.clone());
            fx.push(QuizEffect::RevealPhonetic(text));
        } else {
            let prefix: String = vocab.word.chars().take(HINT_PREFIX_CHARS).collect();
            self.input.set(&prefix, None);
        }
        self.hint_used = true;
        self.total_hints += 1;
    }

    fn on_request_exit(&mut self, fx: &mut Vec<QuizEffect>) {
        if self.navigating_away || self.pending_confirm.is_some() {
            return;
        }
        self.pending_confirm = Some(PendingConfirm::Exit);
        fx.push(QuizEffect::ConfirmExit);
    }

    fn on_confirm(&mut self, yes: bool, fx: &mut Vec<QuizEffect>) {
        let Some(pending) = self.pending_confirm.take() else {
            return;
        };
        if !yes {
            if pending == PendingConfirm::Exit {
                self.resume_if_needed();
            }
            return;
        }
        let msg = if self.challenge.is_some() {
            MSG_CHALLENGE_QUIT
        } else {
            MSG_QUIT
        };
        self.terminate(Termination::UserExit, self.correct_count, msg, fx);
    }

    fn on_submit_score(&mut self, text: &str, fx: &mut Vec<QuizEffect>) {
        if self.phase != Phase::AwaitingScore {
            return;
        }
        let score = text.trim().parse::<i64>().unwrap_or(0).clamp(0, 100) as usize;
        let msg = format!("本次答对：{score}个单词！");
        self.terminate(Termination::Success, score, &msg, fx);
    }

    fn on_activated(&mut self, fx: &mut Vec<QuizEffect>) {
        if !self.lifecycle_attached {
            return;
        }
        self.resume_if_needed();
        if self.challenge.is_some() && !self.navigating_away {
            fx.push(QuizEffect::ExitControlVisible);
        }
    }

    fn resume_if_needed(&mut self) {
        if self.finished {
            return;
        }
        self.countdown.resume();
    }

    fn record_challenge_miss(&mut self) {
        let missed = self.quiz_list.get(self.current_index).cloned();
        if let Some(ch) = self.challenge.as_mut() {
            ch.failed = missed;
        }
    }

    fn on_exhausted(&mut self, fx: &mut Vec<QuizEffect>) {
        self.finished = true;
        self.countdown.pause();

        if self.challenge.is_some() {
            self.terminate(Termination::Success, self.correct_count, MSG_CHALLENGE_DONE, fx);
            return;
        }

        fx.push(QuizEffect::AnswerKey(self.answer_key()));
        if self.written {
            self.phase = Phase::AwaitingScore;
            fx.push(QuizEffect::PromptScore);
        } else {
            let score = self.correct_count;
            let msg = format!(
                "本次已自动判卷：答对 {}/{} 个单词。",
                score,
                self.quiz_list.len()
            );
            self.terminate(Termination::Success, score, &msg, fx);
        }
    }

    // ----- termination -----

    /// Questions that count towards this round. A challenge only counts the
    /// questions it actually reached.
    fn total_count(&self) -> usize {
        if self.challenge.is_some() {
            (self.current_index + 1).min(self.quiz_list.len())
        } else {
            self.quiz_list.len()
        }
    }

    pub fn answer_key(&self) -> Vec<(String, String)> {
        self.quiz_list[..self.total_count()]
            .iter()
            .map(|v| (v.meaning.clone(), v.word.clone()))
            .collect()
    }

    /// "范围：" plus the distinct book-unit pairs asked, one per line.
    pub fn range_text(&self) -> String {
        let pairs: BTreeSet<(Book, Unit)> = self.quiz_list[..self.total_count()]
            .iter()
            .map(|v| (v.book, v.unit))
            .collect();
        if pairs.is_empty() {
            return String::new();
        }
        let lines: Vec<String> = pairs.iter().map(|(b, u)| format!("{b}-{u}")).collect();
        format!("范围：{}", lines.join("\n"))
    }

    fn build_history(&self, score: usize) -> QuizHistory {
        let total = self.total_count();
        let asked = &self.quiz_list[..total];
        let mut user_answers: Vec<String> = self.user_answers.iter().take(total).cloned().collect();
        for a in user_answers.iter_mut() {
            if a.trim().is_empty() {
                *a = UNANSWERED.to_string();
            }
        }
        while user_answers.len() < total {
            user_answers.push(UNANSWERED.to_string());
        }
        QuizHistory {
            date: Utc::now(),
            meanings: asked.iter().map(|v| v.meaning.clone()).collect(),
            answers: asked.iter().map(|v| v.word.clone()).collect(),
            user_answers,
            correct_count: score,
            total_count: total,
            is_success: total > 0 && score >= total,
            range_text: Some(self.range_text()).filter(|s| !s.is_empty()),
        }
    }

    /// The only way a session ends. Runs at most once.
    fn terminate(
        &mut self,
        termination: Termination,
        score: usize,
        message: &str,
        fx: &mut Vec<QuizEffect>,
    ) {
        if self.navigating_away {
            return;
        }
        self.navigating_away = true;
        self.finished = true;
        self.phase = Phase::Finished;
        self.pending_confirm = None;
        self.countdown.pause();
        self.lifecycle_attached = false;

        let total = self.total_count();
        let is_exit = termination == Termination::UserExit;

        let mut challenge_best = None;
        let mut level = None;
        if let Some(ch) = self.challenge.as_ref() {
            let failed = ch.failed.as_ref();
            let record = ChallengeRecord {
                date: Utc::now(),
                correct_count: score,
                failed_word: failed.map(|v| v.word.clone()),
                failed_meaning: failed.map(|v| v.meaning.clone()),
                failed_phonetic: failed.map(|v| v.phonetic.clone()),
                is_exit,
                is_success: termination == Termination::Success,
                level: ch.level.clone(),
            };
            if let Err(e) = self.store.append_challenge_record(&record) {
                tracing::error!(error = %e, "failed to save challenge record");
            }
            challenge_best = Some(self.store.challenge_best(score));
            level = ch.level.clone();
        }

        let history = self.build_history(score);
        if let Err(e) = self.store.append_quiz_history(&history) {
            tracing::error!(error = %e, "failed to save quiz history");
        }
        if is_exit {
            if let Err(e) = self.store.set_last_exit_reason(Some(ExitReason::Exit)) {
                tracing::error!(error = %e, "failed to save exit reason");
            }
        }

        let success = termination == Termination::Success;
        tracing::info!(?termination, correct = score, total, "quiz session finished");
        if let Some(mut callback) = self.on_finished.take() {
            callback(success, score, total);
        }

        fx.push(QuizEffect::Finished(RoundOutcome {
            termination,
            correct_count: score,
            total_count: total,
            message: message.to_string(),
            range_text: history.range_text.unwrap_or_default(),
            challenge_best,
            level,
        }));
    }
}
