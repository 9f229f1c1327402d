use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::app::{ConfirmKind, QuizView};
use crate::session::{AnswerInput, MAX_HINTS, MAX_WRONG_WORDS, QuizSession, Termination};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

pub struct QuizPanel<'a> {
    session: &'a QuizSession,
    view: &'a QuizView,
    seconds_per_question: u32,
    theme: &'a Theme,
}

impl<'a> QuizPanel<'a> {
    pub fn new(
        session: &'a QuizSession,
        view: &'a QuizView,
        seconds_per_question: u32,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            view,
            seconds_per_question,
            theme,
        }
    }

    fn status_line(&self) -> String {
        let s = self.session;
        if s.is_challenge() {
            let level = s.level().unwrap_or_default();
            return format!(
                " 挑战 {level} | 第 {} 题 | 已答对 {} ",
                s.current_index() + 1,
                s.correct_count()
            );
        }
        let mode = if s.is_written() { "默写" } else { "闯关" };
        format!(
            " {mode} | 第 {}/{} 题 | 错词 {}/{} | 提示 {}/{} ",
            (s.current_index() + 1).min(s.quiz_len()),
            s.quiz_len(),
            s.wrong_count(),
            MAX_WRONG_WORDS,
            s.total_hints(),
            MAX_HINTS
        )
    }

    fn input_line(&self, input: &AnswerInput) -> Line<'static> {
        let colors = &self.theme.colors;
        let (before, at, after) = input.render_parts();
        let cursor = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
        Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            Span::styled(at.map(String::from).unwrap_or_else(|| " ".to_string()), cursor),
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
        ])
    }

    fn render_question(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.session;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            self.status_line(),
            Style::default().fg(colors.text_secondary()),
        ))
        .render(layout[0], buf);

        let remaining = s.remaining_seconds();
        let ratio = if self.seconds_per_question == 0 {
            0.0
        } else {
            f64::from(remaining) / f64::from(self.seconds_per_question)
        };
        let label = if s.timer_running() { "倒计时" } else { "已暂停" };
        ProgressBar::new(label, ratio, format!("{remaining} 秒"), self.theme).render(layout[1], buf);

        let prompt = s.prompt().unwrap_or_default();
        Paragraph::new(Line::from(Span::styled(
            prompt,
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[2], buf);

        if s.is_written() {
            let phonetic = s.phonetic().unwrap_or("请在纸上写出单词");
            Paragraph::new(Span::styled(
                phonetic.to_string(),
                Style::default().fg(colors.text_secondary()),
            ))
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .render(layout[3], buf);
        } else {
            let border = if self.view.shaking {
                colors.error()
            } else {
                colors.border_focused()
            };
            Paragraph::new(self.input_line(s.input()))
                .block(
                    Block::bordered()
                        .title(" 英文单词 ")
                        .border_style(Style::default().fg(border)),
                )
                .render(layout[3], buf);
        }

        let feedback = self
            .view
            .flash
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(s.feedback());
        Paragraph::new(Span::styled(
            feedback.to_string(),
            Style::default().fg(colors.error()),
        ))
        .alignment(Alignment::Center)
        .render(layout[4], buf);

        if s.is_challenge() && self.view.exit_control {
            Paragraph::new(Span::styled(
                "[Tab] 结束挑战",
                Style::default().fg(colors.accent()),
            ))
            .alignment(Alignment::Center)
            .render(layout[5], buf);
        }
    }

    fn render_confirm(&self, kind: ConfirmKind, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let text = match kind {
            ConfirmKind::Exit => "确定要退出闯关吗？本轮将记为失败。",
            ConfirmKind::EndChallenge => "确定要结束挑战吗？",
        };
        let popup = centered_rect(50, 30, area);
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(text, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                "[y] 确定   [n] 取消",
                Style::default().fg(colors.accent()),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .title(" 提示 ")
                .border_style(Style::default().fg(colors.warning()))
                .style(Style::default().bg(colors.panel_bg())),
        )
        .render(popup, buf);
    }

    fn render_grading(&self, score: &AnswerInput, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let popup = centered_rect(70, 80, area);
        Clear.render(popup, buf);

        let mut lines = vec![Line::from(Span::styled(
            "标准答案：",
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        ))];
        for (i, (meaning, word)) in self.view.answer_key.iter().enumerate() {
            lines.push(Line::from(format!("{}. {meaning}  {word}", i + 1)));
        }
        lines.push(Line::from(""));
        let mut prompt = vec![Span::styled(
            "请输入答对的单词数 (0-100)：",
            Style::default().fg(colors.fg()),
        )];
        prompt.extend(self.input_line(score).spans);
        lines.push(Line::from(prompt));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" 家长判卷 ")
                    .border_style(Style::default().fg(colors.border_focused()))
                    .style(Style::default().bg(colors.panel_bg())),
            )
            .render(popup, buf);
    }

    fn render_outcome(&self, area: Rect, buf: &mut Buffer) {
        let Some(outcome) = self.view.outcome.as_ref() else {
            return;
        };
        let colors = &self.theme.colors;
        let popup = centered_rect(70, 80, area);
        Clear.render(popup, buf);

        let (title, accent) = match outcome.termination {
            Termination::Success => (" 闯关成功 ", colors.success()),
            Termination::Failure => (" 闯关失败 ", colors.error()),
            Termination::UserExit => (" 已退出 ", colors.warning()),
        };

        let mut lines = vec![
            Line::from(Span::styled(
                outcome.message.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "答对 {} / {}",
                outcome.correct_count, outcome.total_count
            )),
        ];
        if let Some(best) = outcome.challenge_best {
            lines.push(Line::from(format!("历史最佳：{best}")));
        }
        if !outcome.range_text.is_empty() {
            lines.push(Line::from(""));
            lines.extend(outcome.range_text.lines().map(|l| Line::from(l.to_string())));
        }
        if !self.view.answer_key.is_empty() && outcome.total_count <= 20 {
            lines.push(Line::from(""));
            for (meaning, word) in &self.view.answer_key {
                lines.push(Line::from(Span::styled(
                    format!("{meaning}  {word}"),
                    Style::default().fg(colors.text_secondary()),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] 返回",
            Style::default().fg(colors.accent()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(accent))
                    .style(Style::default().bg(colors.panel_bg())),
            )
            .render(popup, buf);
    }
}

impl Widget for QuizPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.view.outcome.is_some() {
            self.render_outcome(inner, buf);
            return;
        }
        if let Some(score) = self.view.score_input.as_ref() {
            self.render_grading(score, inner, buf);
            return;
        }

        self.render_question(inner, buf);
        // A round that ended under the popup leaves no question to confirm.
        let pending = self.view.confirm.filter(|_| self.session.awaiting_confirmation());
        if let Some(kind) = pending {
            self.render_confirm(kind, inner, buf);
        }
    }
}
