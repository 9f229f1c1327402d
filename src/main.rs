use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::event::{
    DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Widget, Wrap};

use wordgate::app::{App, AppScreen, EditField, MENU_ITEMS, SettingsRow};
use wordgate::config::Config;
use wordgate::event::{AppEvent, EventHandler, SecondClock};
use wordgate::session::{InputEdit, QuizEvent};
use wordgate::store::json_store::JsonStore;
use wordgate::telemetry;
use wordgate::ui;
use wordgate::ui::components::menu::Menu;
use wordgate::ui::components::quiz_panel::QuizPanel;
use wordgate::ui::layout::{AppLayout, format_clock};
use wordgate::ui::theme::Theme;
use wordgate::vocab::VocabRepository;

#[derive(Parser)]
#[command(
    name = "wordgate",
    version,
    about = "Screen-time gate that unlocks with an English vocabulary quiz"
)]
struct Cli {
    #[arg(short, long, help = "Seconds of use before a quiz is due")]
    limit: Option<u32>,

    #[arg(short, long, help = "Questions per round (minimum 8)")]
    questions: Option<usize>,

    #[arg(short = 's', long, help = "Seconds per question (minimum 5)")]
    time: Option<u32>,

    #[arg(short, long, help = "Written mode: answers go on paper, a parent grades")]
    written: bool,

    #[arg(short, long, help = "Theme name (default, eye-care)")]
    theme: Option<String>,

    #[arg(long, help = "Directory for history and log files")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(JsonStore::default_dir);
    let store = JsonStore::with_base_dir(data_dir.clone())?;
    if let Err(e) = telemetry::init_tracing(&data_dir) {
        eprintln!("logging disabled: {e}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "settings unreadable, using defaults");
        Config::default()
    });
    if let Some(limit) = cli.limit {
        config.usage_limit_secs = limit;
    }
    if let Some(questions) = cli.questions {
        config.question_count = questions;
    }
    if let Some(time) = cli.time {
        config.time_per_question = time;
    }
    if cli.written {
        config.written_mode = true;
    }
    config.normalize();

    let events = EventHandler::new(Duration::from_millis(100));
    let catalog = VocabRepository::load();
    let mut app = App::new(config, store, catalog, events.sender());
    app.config_path = Some(Config::config_path());
    if let Some(theme_name) = cli.theme {
        match Theme::load(&theme_name) {
            Some(theme) => app.theme = theme,
            None => tracing::warn!(theme = %theme_name, "unknown theme"),
        }
    }

    tracing::info!(
        limit = app.config.usage_limit_secs,
        questions = app.config.question_count,
        "wordgate started"
    );

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        tracing::error!(%info, "panic");
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen)?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut clock = SecondClock::new(Instant::now());
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
            AppEvent::FocusGained => app.on_focus_gained(Instant::now()),
            AppEvent::FocusLost => app.on_focus_lost(),
            AppEvent::RoundFinished {
                success,
                correct,
                total,
                origin,
            } => app.on_round_finished(success, correct, total, origin),
        }

        let now = Instant::now();
        for _ in 0..clock.advance(now) {
            app.on_second(now);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn edit_for_key(key: &KeyEvent) -> Option<InputEdit> {
    match key.code {
        KeyCode::Char(ch) => Some(InputEdit::Insert(ch)),
        KeyCode::Backspace => Some(InputEdit::Backspace),
        KeyCode::Delete => Some(InputEdit::Delete),
        KeyCode::Left => Some(InputEdit::Left),
        KeyCode::Right => Some(InputEdit::Right),
        KeyCode::Home => Some(InputEdit::Home),
        KeyCode::End => Some(InputEdit::End),
        _ => None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.notice.is_some() {
        app.notice = None;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::ChallengeSelect => handle_challenge_key(app, key),
        AppScreen::Review => handle_review_key(app, key),
        AppScreen::History => handle_history_key(app, key),
        AppScreen::ParentLogin => handle_parent_login_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_next(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Enter => {
            if let Some(&item) = MENU_ITEMS.get(app.menu_selected) {
                app.activate_menu(item);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(&item) = MENU_ITEMS.iter().find(|i| i.key() == ch) {
                app.activate_menu(item);
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if app.quiz_view.outcome.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.close_quiz();
        }
        return;
    }

    if let Some(score) = app.quiz_view.score_input.as_mut() {
        match key.code {
            KeyCode::Enter => app.submit_score(),
            KeyCode::Char(ch) if ch.is_ascii_digit() => score.apply(InputEdit::Insert(ch)),
            KeyCode::Char(_) => {}
            _ => {
                if let Some(edit) = edit_for_key(&key) {
                    score.apply(edit);
                }
            }
        }
        return;
    }

    if app.quiz_view.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.quiz_event(QuizEvent::Confirm(true)),
            KeyCode::Char('n') | KeyCode::Esc => app.quiz_event(QuizEvent::Confirm(false)),
            _ => {}
        }
        return;
    }

    let written = app.quiz.as_ref().is_some_and(|q| q.is_written());
    match key.code {
        KeyCode::Esc => app.quiz_event(QuizEvent::RequestExit),
        KeyCode::Tab => app.quiz_event(QuizEvent::Hint),
        KeyCode::Enter if written => app.quiz_event(QuizEvent::Next),
        KeyCode::Char(' ') if written => app.quiz_event(QuizEvent::Next),
        KeyCode::Enter => app.quiz_event(QuizEvent::Submit),
        _ => {
            if let Some(edit) = edit_for_key(&key) {
                app.quiz_event(QuizEvent::Input(edit));
            }
        }
    }
}

fn handle_challenge_key(app: &mut App, key: KeyEvent) {
    let levels = app.challenge_levels().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.challenge_selected = app.challenge_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.challenge_selected = (app.challenge_selected + 1).min(levels.saturating_sub(1));
        }
        KeyCode::Enter => app.start_challenge(app.challenge_selected),
        _ => {}
    }
}

fn handle_review_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Right => {
            app.next_review_card();
        }
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    if app.history_detail {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.history_detail = false;
        }
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Down | KeyCode::Char('j') => app.history_next(),
        KeyCode::Up | KeyCode::Char('k') => app.history_prev(),
        KeyCode::Enter => app.history_detail = !app.history.is_empty(),
        _ => {}
    }
}

fn handle_parent_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.password_input.clear();
            app.go_to_menu();
        }
        KeyCode::Enter => app.submit_parent_password(),
        _ => {
            if let Some(edit) = edit_for_key(&key) {
                app.password_input.apply(edit);
            }
        }
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    if let Some(edit) = app.settings_edit.as_mut() {
        match key.code {
            KeyCode::Enter => app.settings_commit_edit(),
            KeyCode::Esc => app.settings_cancel_edit(),
            _ => {
                if let Some(e) = edit_for_key(&key) {
                    edit.input.apply(e);
                }
            }
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.settings_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.settings_move(true),
        KeyCode::Enter | KeyCode::Char(' ') => app.settings_activate(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::ChallengeSelect => render_challenge_select(frame, app),
        AppScreen::Review => render_review(frame, app),
        AppScreen::History => render_history(frame, app),
        AppScreen::ParentLogin => render_parent_login(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }

    if let Some(notice) = app.notice.as_deref() {
        render_notice(frame, app, notice);
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, title: &str) {
    let colors = &app.theme.colors;
    let gate_info = if app.parent_mode {
        " | 家长模式：限制已解除".to_string()
    } else if app.gate.need_quiz() || !app.gate.is_running() {
        String::new()
    } else {
        format!(" | 距离答题还有 {}", format_clock(app.gate.remaining_secs()))
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            gate_info,
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, text: &str) {
    let footer = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(app.theme.colors.text_secondary()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "wordgate");

    let menu = Menu {
        selected: app.menu_selected,
        son_mode_enabled: app.son_mode_enabled,
        welcome: &app.welcome,
        soup: &app.soup,
        theme: &app.theme,
    };
    let menu_area = ui::layout::centered_rect(50, 90, layout.main);
    frame.render_widget(&menu, menu_area);

    render_footer(
        frame,
        app,
        layout.footer,
        " [1-5] 选择  [t] 护眼模式  [q] 退出 ",
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let Some(quiz) = app.quiz.as_ref() else {
        return;
    };
    let layout = AppLayout::new(frame.area());
    let title = if quiz.is_challenge() { "挑战" } else { "闯关" };
    render_header(frame, app, layout.header, title);

    let panel = QuizPanel::new(
        quiz,
        &app.quiz_view,
        app.config.time_per_question,
        &app.theme,
    );
    frame.render_widget(panel, layout.main);

    let keys = if quiz.is_challenge() {
        " [Enter] 提交  [Esc] 退出 "
    } else if quiz.is_written() {
        " [Enter] 下一题  [Tab] 音标提示  [Esc] 退出 "
    } else {
        " [Enter] 提交  [Tab] 提示  [Esc] 退出 "
    };
    render_footer(frame, app, layout.footer, keys);
}

fn render_challenge_select(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "挑战模式");

    let items: Vec<ListItem> = app
        .challenge_levels()
        .into_iter()
        .map(|label| ListItem::new(Line::from(format!("  {label}"))))
        .collect();
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" 选择范围 ")
                .border_style(Style::default().fg(colors.border())),
        )
        .style(Style::default().fg(colors.fg()))
        .highlight_style(Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD))
        .highlight_symbol(">");
    let mut state = ListState::default().with_selected(Some(app.challenge_selected));
    let area = ui::layout::centered_rect(40, 80, layout.main);
    frame.render_stateful_widget(list, area, &mut state);

    render_footer(frame, app, layout.footer, " [Enter] 开始  [Esc] 返回 ");
}

fn render_review(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "复习模式");

    let lines = match app.review_card.as_ref() {
        Some(card) => vec![
            Line::from(""),
            Line::from(Span::styled(
                card.word.clone(),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.phonetic.clone(),
                Style::default().fg(colors.text_secondary()),
            )),
            Line::from(""),
            Line::from(Span::styled(card.meaning.clone(), Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} {}", card.book, card.unit),
                Style::default().fg(colors.text_secondary()),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled("无词汇", Style::default().fg(colors.fg()))),
            Line::from(Span::styled(
                "请在家长设置中选择单元",
                Style::default().fg(colors.text_secondary()),
            )),
        ],
    };
    let area = ui::layout::centered_rect(50, 60, layout.main);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.panel_bg())),
        ),
        area,
    );

    render_footer(frame, app, layout.footer, " [Enter] 下一个  [Esc] 返回 ");
}

fn render_history(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "闯关记录");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(layout.main);

    let passed = app.records.iter().filter(|r| r.is_success).count();
    let summary = format!(
        " 共 {} 次，成功 {} 次 | 挑战最佳：{}",
        app.records.len(),
        passed,
        app.challenge_best
    );
    frame.render_widget(
        Paragraph::new(Span::styled(summary, Style::default().fg(colors.fg()))),
        chunks[0],
    );

    if app.history_detail {
        if let Some(h) = app.history.get(app.history_selected) {
            let mut text = h.detail_text();
            if let Some(range) = h.range_text.as_deref() {
                text = format!("{range}\n\n{text}");
            }
            let title = format!(" 第{}次考试详情 ", app.history_attempt(app.history_selected));
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: false })
                    .style(Style::default().fg(colors.fg()))
                    .block(
                        Block::bordered()
                            .title(title)
                            .border_style(Style::default().fg(colors.border_focused())),
                    ),
                chunks[1],
            );
        }
        render_footer(frame, app, layout.footer, " [Esc] 关闭 ");
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let status = if h.is_success { "成功" } else { "失败" };
            let fg = if h.is_success {
                colors.success()
            } else {
                colors.error()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(
                        "  第{}次  {}  答对 {}/{}  ",
                        app.history_attempt(i),
                        h.date.with_timezone(&Local).format("%m-%d %H:%M"),
                        h.correct_count,
                        h.total_count
                    ),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(status, Style::default().fg(fg)),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("暂无记录")
                .alignment(Alignment::Center)
                .style(Style::default().fg(colors.text_secondary())),
            chunks[1],
        );
    } else {
        let list = List::new(items)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(app.history_selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    render_footer(frame, app, layout.footer, " [Enter] 详情  [j/k] 选择  [Esc] 返回 ");
}

fn render_parent_login(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "家长模式");

    let masked = "*".repeat(app.password_input.value().chars().count());
    let area = ui::layout::centered_rect(40, 30, layout.main);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("请输入家长密码", Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(masked, Style::default().fg(colors.accent()))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border_focused()))
                .style(Style::default().bg(colors.panel_bg())),
        ),
        area,
    );

    render_footer(frame, app, layout.footer, " [Enter] 确定  [Esc] 取消 ");
}

fn settings_row_label(app: &App, row: SettingsRow) -> String {
    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let config = &app.config;
    match row {
        SettingsRow::Book(book) => format!("{} {book}", check(config.is_book_enabled(book))),
        SettingsRow::Unit(book, unit) => {
            format!("    {} {unit}", check(config.is_unit_selected(book, unit)))
        }
        SettingsRow::QuestionCount => format!("题目数量：{}", config.question_count),
        SettingsRow::TimePerQuestion => format!("每题时间：{} 秒", config.time_per_question),
        SettingsRow::UsageLimit => format!("使用时长：{} 秒", config.usage_limit_secs),
        SettingsRow::WrittenMode => {
            format!("默写模式：{}", if config.written_mode { "开" } else { "关" })
        }
        SettingsRow::Theme => {
            let name = if app.theme.is_eye_care() { "护眼" } else { "普通" };
            format!("主题：{name}")
        }
        SettingsRow::ClearRecords => format!("清空闯关记录（共 {} 条）", app.records.len()),
        SettingsRow::ChangePassword => "修改家长密码".to_string(),
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "家长设置");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(layout.main);

    let items: Vec<ListItem> = app
        .settings_rows()
        .into_iter()
        .map(|row| ListItem::new(Line::from(format!("  {}", settings_row_label(app, row)))))
        .collect();
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" 设置 ")
                .border_style(Style::default().fg(colors.accent())),
        )
        .style(Style::default().fg(colors.fg()))
        .highlight_style(Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD))
        .highlight_symbol(">");
    let mut state = ListState::default().with_selected(Some(app.settings_selected));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(edit) = app.settings_edit.as_ref() {
        let (label, shown) = match &edit.field {
            EditField::QuestionCount => ("题目数量", edit.input.value().to_string()),
            EditField::TimePerQuestion => ("每题时间（秒）", edit.input.value().to_string()),
            EditField::UsageLimit => ("使用时长（秒）", edit.input.value().to_string()),
            EditField::CurrentPassword => {
                ("当前密码", "*".repeat(edit.input.value().chars().count()))
            }
            EditField::NewPassword { .. } => {
                ("新密码", "*".repeat(edit.input.value().chars().count()))
            }
        };
        frame.render_widget(
            Paragraph::new(Span::styled(shown, Style::default().fg(colors.fg()))).block(
                Block::bordered()
                    .title(format!(" {label} "))
                    .border_style(Style::default().fg(colors.border_focused())),
            ),
            chunks[1],
        );
    }

    let keys = if app.settings_edit.is_some() {
        " [Enter] 确定  [Esc] 取消 "
    } else {
        " [Enter] 切换/编辑  [j/k] 选择  [Esc] 保存并返回 "
    };
    render_footer(frame, app, layout.footer, keys);
}

fn render_notice(frame: &mut ratatui::Frame, app: &App, notice: &str) {
    let colors = &app.theme.colors;
    let area = ui::layout::centered_rect(40, 20, frame.area());
    let buf = frame.buffer_mut();
    Clear.render(area, buf);
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice.to_string(), Style::default().fg(colors.fg()))),
        Line::from(""),
        Line::from(Span::styled("按任意键继续", Style::default().fg(colors.text_secondary()))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::bordered()
            .title(" 提示 ")
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.panel_bg())),
    )
    .render(area, buf);
}
