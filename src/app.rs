use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::event::AppEvent;
use crate::gate::UsageGate;
use crate::messages;
use crate::session::{
    AnswerInput, ChallengeSetup, QuizEffect, QuizEvent, QuizSession, RoundOutcome, SessionError,
    SessionParams,
};
use crate::store::SessionStore;
use crate::store::json_store::JsonStore;
use crate::store::schema::{ExitReason, QuizHistory, QuizRecord};
use crate::ui::theme::Theme;
use crate::vocab::{ALL_BOOKS, ALL_UNITS, Book, Unit, Vocab, VocabRepository};

/// Entries shown on the history screen.
pub const HISTORY_LIMIT: usize = 13;
pub const CHALLENGE_ALL_LEVEL: &str = "全部";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    ChallengeSelect,
    Review,
    History,
    ParentLogin,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    SonMode,
    Challenge,
    Review,
    History,
    ParentMode,
    Quit,
}

pub const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::SonMode,
    MenuItem::Challenge,
    MenuItem::Review,
    MenuItem::History,
    MenuItem::ParentMode,
    MenuItem::Quit,
];

impl MenuItem {
    pub fn key(self) -> char {
        match self {
            MenuItem::SonMode => '1',
            MenuItem::Challenge => '2',
            MenuItem::Review => '3',
            MenuItem::History => '4',
            MenuItem::ParentMode => '5',
            MenuItem::Quit => 'q',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::SonMode => "儿子模式",
            MenuItem::Challenge => "挑战模式",
            MenuItem::Review => "复习模式",
            MenuItem::History => "闯关记录",
            MenuItem::ParentMode => "家长模式",
            MenuItem::Quit => "退出",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuItem::SonMode => "马上开始一轮单词闯关",
            MenuItem::Challenge => "一直答到答错为止",
            MenuItem::Review => "随机翻看所选单元的单词",
            MenuItem::History => "最近的闯关详情",
            MenuItem::ParentMode => "输入密码后修改设置",
            MenuItem::Quit => "",
        }
    }
}

/// Who started the running quiz. Only gate rounds feed back into the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOrigin {
    Gate,
    SonMode,
    Challenge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmKind {
    Exit,
    EndChallenge,
}

/// Presentation state accumulated from session effects.
#[derive(Debug, Default)]
pub struct QuizView {
    pub confirm: Option<ConfirmKind>,
    pub flash: Option<String>,
    pub shaking: bool,
    pub answer_key: Vec<(String, String)>,
    pub score_input: Option<AnswerInput>,
    pub outcome: Option<RoundOutcome>,
    /// The challenge "end" control is on screen and accepts Tab.
    pub exit_control: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsRow {
    Book(Book),
    Unit(Book, Unit),
    QuestionCount,
    TimePerQuestion,
    UsageLimit,
    WrittenMode,
    Theme,
    ClearRecords,
    ChangePassword,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditField {
    QuestionCount,
    TimePerQuestion,
    UsageLimit,
    CurrentPassword,
    NewPassword { current: String },
}

#[derive(Clone, Debug)]
pub struct SettingsEdit {
    pub field: EditField,
    pub input: AnswerInput,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    /// Where settings are written. `None` keeps them in memory only.
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub store: JsonStore,
    pub catalog: VocabRepository,
    pub gate: UsageGate,
    pub quiz: Option<QuizSession>,
    pub quiz_view: QuizView,
    pub navigating: bool,
    pub focused: bool,
    pub parent_mode: bool,
    pub son_mode_enabled: bool,
    pub welcome: String,
    pub soup: String,
    /// Modal message; any key dismisses it.
    pub notice: Option<String>,
    pub menu_selected: usize,
    pub challenge_selected: usize,
    pub review_card: Option<Vocab>,
    pub records: Vec<QuizRecord>,
    pub history: Vec<QuizHistory>,
    pub history_total: usize,
    pub history_selected: usize,
    pub history_detail: bool,
    pub challenge_best: usize,
    pub password_input: AnswerInput,
    pub settings_selected: usize,
    pub settings_edit: Option<SettingsEdit>,
    pub should_quit: bool,
    events: mpsc::Sender<AppEvent>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        store: JsonStore,
        catalog: VocabRepository,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let mut gate = UsageGate::new(u64::from(config.usage_limit_secs));
        gate.start();
        let records = store.load_prefs().quiz_records;
        let mut rng = SmallRng::from_entropy();
        let soup = messages::pick(messages::SOUPS, &mut rng).to_string();

        Self {
            screen: AppScreen::Menu,
            config,
            config_path: None,
            theme,
            store,
            catalog,
            gate,
            quiz: None,
            quiz_view: QuizView::default(),
            navigating: false,
            focused: true,
            parent_mode: false,
            son_mode_enabled: true,
            welcome: messages::WELCOME.to_string(),
            soup,
            notice: None,
            menu_selected: 0,
            challenge_selected: 0,
            review_card: None,
            records,
            history: Vec::new(),
            history_total: 0,
            history_selected: 0,
            history_detail: false,
            challenge_best: 0,
            password_input: AnswerInput::new(),
            settings_selected: 0,
            settings_edit: None,
            should_quit: false,
            events,
            rng,
        }
    }

    // ----- time and focus -----

    /// One second of wall time passed.
    pub fn on_second(&mut self, now: Instant) {
        if self.quiz.is_some() {
            self.quiz_event(QuizEvent::Tick);
        }
        // Background time does not count towards the limit.
        if !self.focused {
            return;
        }
        let due = self.gate.tick();
        // A limit reached under another round is still owed once it closes.
        let owed = self.quiz.is_none() && self.gate.need_quiz() && self.notice.is_none();
        if due || owed {
            self.try_launch_due_quiz(now);
        }
    }

    pub fn on_focus_gained(&mut self, now: Instant) {
        self.focused = true;
        if self.quiz.is_some() {
            self.quiz_event(QuizEvent::Activated);
        }
        if !self.parent_mode {
            self.gate.on_foreground();
            self.try_launch_due_quiz(now);
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.focused = false;
        if self.quiz.is_some() {
            // Hidden until the session re-announces it on reactivation.
            self.quiz_view.exit_control = false;
            self.quiz_event(QuizEvent::Deactivated);
        }
    }

    // ----- quiz lifecycle -----

    pub fn try_launch_due_quiz(&mut self, now: Instant) {
        if self.parent_mode {
            return;
        }
        if !self.gate.try_consume(now, self.navigating, self.quiz.is_some()) {
            return;
        }
        if let Err(err) = self.launch(QuizOrigin::Gate, None) {
            tracing::warn!(error = %err, "due quiz could not start, re-arming gate");
            self.gate.rearm();
            self.notice = Some(format!("{err}，请在家长设置中选择单元"));
        }
    }

    pub fn start_son_mode(&mut self) {
        if !self.son_mode_enabled || self.quiz.is_some() {
            return;
        }
        self.son_mode_enabled = false;
        self.welcome = messages::WELCOME_SON.to_string();
        if let Err(err) = self.launch(QuizOrigin::SonMode, None) {
            self.son_mode_enabled = true;
            self.notice = Some(format!("{err}，请在家长设置中选择单元"));
        }
    }

    /// Labels on the challenge picker: the whole catalog, then each book.
    pub fn challenge_levels(&self) -> Vec<&'static str> {
        std::iter::once(CHALLENGE_ALL_LEVEL)
            .chain(ALL_BOOKS.iter().map(|b| b.title()))
            .collect()
    }

    pub fn start_challenge(&mut self, choice: usize) {
        if self.quiz.is_some() {
            return;
        }
        let setup = match choice.checked_sub(1) {
            None => ChallengeSetup {
                pool: Vec::new(),
                level: Some(CHALLENGE_ALL_LEVEL.to_string()),
            },
            Some(i) => {
                let Some(&book) = ALL_BOOKS.get(i) else {
                    return;
                };
                let pool = self.catalog.in_book(book);
                // An empty pool would silently widen to the whole catalog.
                if pool.is_empty() {
                    self.notice = Some(format!("{book} 无词汇"));
                    return;
                }
                ChallengeSetup {
                    pool,
                    level: Some(book.title().to_string()),
                }
            }
        };
        if let Err(err) = self.launch(QuizOrigin::Challenge, Some(setup)) {
            self.notice = Some(err.to_string());
        }
    }

    fn launch(
        &mut self,
        origin: QuizOrigin,
        challenge: Option<ChallengeSetup>,
    ) -> Result<(), SessionError> {
        self.navigating = true;
        let params = SessionParams {
            selection: self.config.selected_units(),
            question_count: self.config.question_count,
            seconds_per_question: self.config.time_per_question,
            written_mode: self.config.written_mode,
            challenge,
            seed: None,
        };
        let tx = self.events.clone();
        let result = QuizSession::new(
            params,
            &self.catalog,
            Box::new(self.store.clone()),
            move |success, correct, total| {
                let ev = AppEvent::RoundFinished {
                    success,
                    correct,
                    total,
                    origin,
                };
                if tx.send(ev).is_err() {
                    tracing::warn!("round finished after the event loop closed");
                }
            },
        );
        self.navigating = false;

        let mut quiz = result?;
        if !self.focused {
            quiz.dispatch(QuizEvent::Deactivated);
        }
        tracing::info!(?origin, "quiz shown");
        self.quiz_view = QuizView {
            exit_control: quiz.is_challenge(),
            ..QuizView::default()
        };
        self.quiz = Some(quiz);
        self.screen = AppScreen::Quiz;
        Ok(())
    }

    /// Feed one event to the running session and fold its effects into the view.
    pub fn quiz_event(&mut self, event: QuizEvent) {
        let challenge = self.quiz.as_ref().is_some_and(|q| q.is_challenge());
        if challenge && matches!(event, QuizEvent::Hint) && !self.quiz_view.exit_control {
            return;
        }
        if matches!(event, QuizEvent::Input(_)) {
            self.quiz_view.shaking = false;
        }
        if matches!(event, QuizEvent::Submit | QuizEvent::Next) {
            self.quiz_view.flash = None;
        }
        if matches!(event, QuizEvent::Confirm(_)) {
            self.quiz_view.confirm = None;
        }
        let effects = match self.quiz.as_mut() {
            Some(quiz) => quiz.dispatch(event),
            None => return,
        };
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: QuizEffect) {
        let view = &mut self.quiz_view;
        match effect {
            QuizEffect::Feedback(text) => view.flash = Some(text),
            QuizEffect::Shake => view.shaking = true,
            // The session keeps the phonetic text itself.
            QuizEffect::RevealPhonetic(_) => {}
            QuizEffect::ConfirmExit => view.confirm = Some(ConfirmKind::Exit),
            QuizEffect::ConfirmEndChallenge => view.confirm = Some(ConfirmKind::EndChallenge),
            QuizEffect::AnswerKey(key) => view.answer_key = key,
            QuizEffect::PromptScore => view.score_input = Some(AnswerInput::new()),
            QuizEffect::ExitControlVisible => view.exit_control = true,
            QuizEffect::Finished(outcome) => {
                view.confirm = None;
                view.score_input = None;
                view.outcome = Some(outcome);
            }
        }
    }

    pub fn submit_score(&mut self) {
        let Some(text) = self.quiz_view.score_input.as_ref().map(|i| i.value().to_string()) else {
            return;
        };
        self.quiz_event(QuizEvent::SubmitScore(text));
    }

    /// Leave the quiz screen once the round is over.
    pub fn close_quiz(&mut self) {
        if self.quiz_view.outcome.is_none() {
            return;
        }
        self.quiz = None;
        self.quiz_view = QuizView::default();
        self.screen = AppScreen::Menu;
    }

    pub fn on_round_finished(
        &mut self,
        success: bool,
        correct: usize,
        total: usize,
        origin: QuizOrigin,
    ) {
        match self.store.push_quiz_record(correct, total, success) {
            Ok(record) => self.records.insert(0, record),
            Err(e) => tracing::error!(error = %e, "failed to save quiz tally"),
        }
        if origin == QuizOrigin::Gate {
            self.gate.on_round_finished(success);
        }

        let exited = match self.store.take_last_exit_reason() {
            Ok(reason) => reason == Some(ExitReason::Exit),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read exit reason");
                false
            }
        };
        let pool = if success && !exited {
            messages::SUCCESS_MESSAGES
        } else {
            messages::FAILURE_MESSAGES
        };
        self.welcome = messages::pick(pool, &mut self.rng).to_string();
        self.son_mode_enabled = true;
    }

    // ----- menu -----

    pub fn menu_next(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % MENU_ITEMS.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_selected = self
            .menu_selected
            .checked_sub(1)
            .unwrap_or(MENU_ITEMS.len() - 1);
    }

    pub fn activate_menu(&mut self, item: MenuItem) {
        match item {
            MenuItem::SonMode => self.start_son_mode(),
            MenuItem::Challenge => {
                self.challenge_selected = 0;
                self.screen = AppScreen::ChallengeSelect;
            }
            MenuItem::Review => self.go_to_review(),
            MenuItem::History => self.go_to_history(),
            MenuItem::ParentMode => {
                self.password_input.clear();
                self.screen = AppScreen::ParentLogin;
            }
            MenuItem::Quit => self.should_quit = true,
        }
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn toggle_theme(&mut self) {
        let name = self.theme.toggled_name();
        let Some(theme) = Theme::load(name) else {
            tracing::warn!(theme = name, "theme not found");
            return;
        };
        self.theme = theme;
        self.config.theme = name.to_string();
        self.save_config();
        let label = if self.theme.is_eye_care() {
            "护眼模式"
        } else {
            "普通模式"
        };
        self.notice = Some(format!("已切换为{label}"));
    }

    // ----- review -----

    pub fn go_to_review(&mut self) {
        self.screen = AppScreen::Review;
        self.next_review_card();
    }

    pub fn next_review_card(&mut self) {
        let selection = self.config.selected_units();
        self.review_card = self
            .catalog
            .random_in_selection(&selection, &mut self.rng)
            .cloned();
    }

    // ----- history -----

    pub fn go_to_history(&mut self) {
        let mut history = self.store.load_quiz_history();
        self.history_total = history.len();
        history.truncate(HISTORY_LIMIT);
        self.history = history;
        self.challenge_best = self.store.challenge_best(0);
        self.history_selected = 0;
        self.history_detail = false;
        self.screen = AppScreen::History;
    }

    pub fn history_next(&mut self) {
        if !self.history.is_empty() {
            self.history_selected = (self.history_selected + 1).min(self.history.len() - 1);
        }
    }

    pub fn history_prev(&mut self) {
        self.history_selected = self.history_selected.saturating_sub(1);
    }

    /// Attempt number shown for a history row, newest first.
    pub fn history_attempt(&self, idx: usize) -> usize {
        self.history_total.saturating_sub(idx)
    }

    // ----- parent mode -----

    pub fn submit_parent_password(&mut self) {
        if self.config.check_password(self.password_input.value()) {
            self.parent_mode = true;
            self.gate.stop();
            self.welcome = messages::WELCOME_PARENT.to_string();
            self.son_mode_enabled = true;
            self.notice = Some("已进入家长模式，限制已解除。".to_string());
            self.settings_selected = 0;
            self.settings_edit = None;
            self.screen = AppScreen::Settings;
            tracing::info!("parent mode entered, usage gate stopped");
        } else {
            self.notice = Some("密码错误".to_string());
            self.screen = AppScreen::Menu;
        }
        self.password_input.clear();
    }

    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows = Vec::new();
        for book in ALL_BOOKS {
            rows.push(SettingsRow::Book(book));
            if self.config.is_book_enabled(book) {
                rows.extend(ALL_UNITS.iter().map(|&u| SettingsRow::Unit(book, u)));
            }
        }
        rows.extend([
            SettingsRow::QuestionCount,
            SettingsRow::TimePerQuestion,
            SettingsRow::UsageLimit,
            SettingsRow::WrittenMode,
            SettingsRow::Theme,
            SettingsRow::ClearRecords,
            SettingsRow::ChangePassword,
        ]);
        rows
    }

    pub fn settings_move(&mut self, down: bool) {
        let len = self.settings_rows().len();
        if down {
            self.settings_selected = (self.settings_selected + 1).min(len - 1);
        } else {
            self.settings_selected = self.settings_selected.saturating_sub(1);
        }
    }

    pub fn settings_activate(&mut self) {
        let rows = self.settings_rows();
        let Some(&row) = rows.get(self.settings_selected) else {
            return;
        };
        match row {
            SettingsRow::Book(book) => {
                let enabled = self.config.is_book_enabled(book);
                self.config.set_book_enabled(book, !enabled);
                // Rows below a collapsed book shift up.
                let len = self.settings_rows().len();
                self.settings_selected = self.settings_selected.min(len - 1);
            }
            SettingsRow::Unit(book, unit) => {
                self.config.toggle_unit(book, unit);
            }
            SettingsRow::QuestionCount => {
                let text = self.config.question_count.to_string();
                self.begin_edit(EditField::QuestionCount, &text);
            }
            SettingsRow::TimePerQuestion => {
                let text = self.config.time_per_question.to_string();
                self.begin_edit(EditField::TimePerQuestion, &text);
            }
            SettingsRow::UsageLimit => {
                let text = self.config.usage_limit_secs.to_string();
                self.begin_edit(EditField::UsageLimit, &text);
            }
            SettingsRow::WrittenMode => self.config.written_mode = !self.config.written_mode,
            SettingsRow::Theme => self.toggle_theme(),
            SettingsRow::ClearRecords => match self.store.clear_quiz_records() {
                Ok(()) => {
                    self.records.clear();
                    self.notice = Some("闯关记录已清空".to_string());
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to clear quiz tally");
                    self.notice = Some("清空失败".to_string());
                }
            },
            SettingsRow::ChangePassword => self.begin_edit(EditField::CurrentPassword, ""),
        }
    }

    fn begin_edit(&mut self, field: EditField, text: &str) {
        let mut input = AnswerInput::new();
        input.set(text, None);
        self.settings_edit = Some(SettingsEdit { field, input });
    }

    pub fn settings_cancel_edit(&mut self) {
        self.settings_edit = None;
    }

    pub fn settings_commit_edit(&mut self) {
        let Some(edit) = self.settings_edit.take() else {
            return;
        };
        let text = edit.input.value();
        match edit.field {
            EditField::QuestionCount => self.config.set_question_count_text(text),
            EditField::TimePerQuestion => self.config.set_time_per_question_text(text),
            EditField::UsageLimit => {
                self.config.set_usage_limit_text(text);
                self.gate.set_threshold(u64::from(self.config.usage_limit_secs));
            }
            EditField::CurrentPassword => {
                if self.config.check_password(text) {
                    self.begin_edit(
                        EditField::NewPassword {
                            current: text.to_string(),
                        },
                        "",
                    );
                } else {
                    self.notice = Some("当前密码错误".to_string());
                }
            }
            EditField::NewPassword { current } => {
                match self.config.change_password(&current, text) {
                    Ok(()) => {
                        self.save_config();
                        self.notice = Some("密码已修改".to_string());
                    }
                    Err(e) => self.notice = Some(e.to_string()),
                }
            }
        }
    }

    pub fn leave_settings(&mut self) {
        self.settings_edit = None;
        self.config.normalize();
        self.save_config();
        self.gate.set_threshold(u64::from(self.config.usage_limit_secs));
        self.parent_mode = false;
        self.gate.start();
        self.screen = AppScreen::Menu;
        tracing::info!("parent mode left, usage gate restarted");
    }

    fn save_config(&self) {
        let Some(path) = self.config_path.as_ref() else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            tracing::error!(error = %e, "failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::config::UnitKey;
    use crate::session::InputEdit;

    fn catalog() -> VocabRepository {
        let words = ["desk", "chair", "lamp", "door", "wall", "floor", "clock", "shelf"];
        let entries = words
            .iter()
            .map(|w| Vocab::new(w, &format!("{w}-释义"), "", Book::Grade6Up, Unit::Unit1))
            .collect();
        VocabRepository::from_entries(entries, Vec::new())
    }

    fn make_app(limit: u32) -> (App, mpsc::Receiver<AppEvent>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            usage_limit_secs: limit,
            ..Config::default()
        };
        let (tx, rx) = mpsc::channel();
        (App::new(config, store, catalog(), tx), rx, dir)
    }

    fn answer_all(app: &mut App) {
        while let Some(word) = app
            .quiz
            .as_ref()
            .and_then(|q| q.current_vocab())
            .map(|v| v.word.clone())
        {
            app.quiz_event(QuizEvent::Input(InputEdit::Clear));
            for ch in word.chars() {
                app.quiz_event(QuizEvent::Input(InputEdit::Insert(ch)));
            }
            app.quiz_event(QuizEvent::Submit);
        }
    }

    fn deliver_round(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
        match rx.try_recv() {
            Ok(AppEvent::RoundFinished {
                success,
                correct,
                total,
                origin,
            }) => app.on_round_finished(success, correct, total, origin),
            _ => panic!("expected a round-finished event"),
        }
        assert!(rx.try_recv().is_err(), "round reported twice");
    }

    #[test]
    fn gate_launches_quiz_and_success_resets_it() {
        let (mut app, rx, _dir) = make_app(3);
        let now = Instant::now();
        app.on_second(now);
        app.on_second(now);
        assert!(app.quiz.is_none());
        app.on_second(now);
        assert_eq!(app.screen, AppScreen::Quiz);
        assert!(!app.gate.need_quiz());

        answer_all(&mut app);
        assert!(app.quiz_view.outcome.as_ref().is_some_and(|o| o.is_success()));
        deliver_round(&mut app, &rx);

        assert_eq!(app.gate.elapsed_secs(), 0);
        assert!(app.gate.is_running());
        assert_eq!(app.records.len(), 1);
        assert_eq!(app.records[0].attempt, 1);
        assert!(messages::SUCCESS_MESSAGES.contains(&app.welcome.as_str()));

        app.close_quiz();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.quiz.is_none());
    }

    #[test]
    fn limit_reached_during_son_mode_launches_after_it_closes() {
        let (mut app, rx, _dir) = make_app(3);
        let now = Instant::now();
        app.start_son_mode();
        for _ in 0..3 {
            app.on_second(now);
        }
        assert!(app.gate.need_quiz());
        assert!(!app.gate.is_running());

        app.quiz_event(QuizEvent::RequestExit);
        app.quiz_event(QuizEvent::Confirm(true));
        deliver_round(&mut app, &rx);
        app.close_quiz();
        assert!(app.quiz.is_none());

        app.on_second(now + Duration::from_secs(4));
        assert_eq!(app.screen, AppScreen::Quiz);
        assert!(!app.gate.need_quiz());

        answer_all(&mut app);
        deliver_round(&mut app, &rx);
        assert_eq!(app.gate.elapsed_secs(), 0);
        assert!(app.gate.is_running());
    }

    #[test]
    fn challenge_exit_control_survives_background() {
        let (mut app, _rx, _dir) = make_app(600);
        let grade6 = ALL_BOOKS.iter().position(|b| *b == Book::Grade6Up).unwrap() + 1;
        app.start_challenge(grade6);
        assert!(app.quiz_view.exit_control);

        app.on_focus_lost();
        assert!(!app.quiz_view.exit_control);
        app.quiz_event(QuizEvent::Hint);
        assert_eq!(app.quiz_view.confirm, None);

        app.on_focus_gained(Instant::now());
        assert!(app.quiz_view.exit_control);
        app.quiz_event(QuizEvent::Hint);
        assert_eq!(app.quiz_view.confirm, Some(ConfirmKind::EndChallenge));
        assert!(app.quiz.as_ref().unwrap().awaiting_confirmation());
    }

    #[test]
    fn background_time_is_not_counted() {
        let (mut app, _rx, _dir) = make_app(2);
        app.on_focus_lost();
        for _ in 0..10 {
            app.on_second(Instant::now());
        }
        assert_eq!(app.gate.elapsed_secs(), 0);
        assert!(app.quiz.is_none());
    }

    #[test]
    fn user_exit_shows_failure_and_keeps_gate_alone() {
        let (mut app, rx, _dir) = make_app(600);
        app.on_second(Instant::now());
        app.start_son_mode();
        assert!(!app.son_mode_enabled);
        app.quiz_event(QuizEvent::RequestExit);
        assert_eq!(app.quiz_view.confirm, Some(ConfirmKind::Exit));
        app.quiz_event(QuizEvent::Confirm(true));
        deliver_round(&mut app, &rx);

        assert!(messages::FAILURE_MESSAGES.contains(&app.welcome.as_str()));
        assert!(app.son_mode_enabled);
        assert_eq!(app.gate.elapsed_secs(), 1);
        assert!(app.gate.is_running());
        assert_eq!(app.store.take_last_exit_reason().unwrap(), None);
        assert!(!app.records[0].is_success);
    }

    #[test]
    fn empty_selection_rearms_gate() {
        let (mut app, _rx, _dir) = make_app(1);
        app.config.selected_units = vec![UnitKey {
            book: Book::Grade6Up,
            unit: Unit::Unit4,
        }];
        let now = Instant::now();
        app.on_second(now);
        assert!(app.quiz.is_none());
        assert!(app.gate.need_quiz());
        assert!(app.notice.is_some());

        // Throttled until two seconds have passed.
        app.config.selected_units = vec![UnitKey {
            book: Book::Grade6Up,
            unit: Unit::Unit1,
        }];
        app.on_focus_gained(now + Duration::from_secs(1));
        assert!(app.quiz.is_none());
        app.on_focus_gained(now + Duration::from_secs(3));
        assert!(app.quiz.is_some());
    }

    #[test]
    fn parent_mode_lifts_and_restores_limit() {
        let (mut app, _rx, _dir) = make_app(600);
        app.activate_menu(MenuItem::ParentMode);
        for ch in "wrong".chars() {
            app.password_input.apply(InputEdit::Insert(ch));
        }
        app.submit_parent_password();
        assert_eq!(app.notice.as_deref(), Some("密码错误"));
        assert_eq!(app.screen, AppScreen::Menu);

        app.activate_menu(MenuItem::ParentMode);
        for ch in "z123456".chars() {
            app.password_input.apply(InputEdit::Insert(ch));
        }
        app.submit_parent_password();
        assert!(app.parent_mode);
        assert!(!app.gate.is_running());
        assert_eq!(app.screen, AppScreen::Settings);

        app.leave_settings();
        assert!(!app.parent_mode);
        assert!(app.gate.is_running());
    }

    #[test]
    fn settings_edits_are_clamped() {
        let (mut app, _rx, _dir) = make_app(600);
        let rows = app.settings_rows();
        app.settings_selected = rows
            .iter()
            .position(|r| *r == SettingsRow::QuestionCount)
            .unwrap();
        app.settings_activate();
        let edit = app.settings_edit.as_mut().unwrap();
        edit.input.set("3", None);
        app.settings_commit_edit();
        assert_eq!(app.config.question_count, 8);
    }

    #[test]
    fn disabling_book_collapses_its_units() {
        let (mut app, _rx, _dir) = make_app(600);
        let before = app.settings_rows().len();
        app.settings_selected = app
            .settings_rows()
            .iter()
            .position(|r| *r == SettingsRow::Book(Book::Grade6Up))
            .unwrap();
        app.settings_activate();
        assert_eq!(app.settings_rows().len(), before - ALL_UNITS.len());
        assert!(app.config.selected_units().is_empty());

        app.leave_settings();
        assert_eq!(app.config.selected_units(), vec![(Book::Grade6Up, Unit::Unit1)]);
    }

    #[test]
    fn book_challenge_uses_that_book_only() {
        let (mut app, _rx, _dir) = make_app(600);
        app.start_challenge(1);
        assert!(app.quiz.is_none());
        assert!(app.notice.is_some());

        let grade6 = ALL_BOOKS.iter().position(|b| *b == Book::Grade6Up).unwrap() + 1;
        app.start_challenge(grade6);
        let quiz = app.quiz.as_ref().unwrap();
        assert!(quiz.is_challenge());
        assert_eq!(quiz.level(), Some("六年级上册"));
    }

    #[test]
    fn review_draws_from_selection() {
        let (mut app, _rx, _dir) = make_app(600);
        app.go_to_review();
        let card = app.review_card.as_ref().unwrap();
        assert_eq!(card.book, Book::Grade6Up);

        app.config.selected_units.clear();
        app.next_review_card();
        assert!(app.review_card.is_none());
    }
}
