use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::{MENU_ITEMS, MenuItem};
use crate::ui::theme::Theme;

pub struct Menu<'a> {
    pub selected: usize,
    pub son_mode_enabled: bool,
    pub welcome: &'a str,
    pub soup: &'a str,
    pub theme: &'a Theme,
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "wordgate",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.welcome, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                self.soup,
                Style::default().fg(colors.text_secondary()),
            )),
        ];

        let title = Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                MENU_ITEMS
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let is_selected = i == self.selected;
            let disabled = *item == MenuItem::SonMode && !self.son_mode_enabled;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key(), item.label());
            let desc_text = format!("     {}", item.description());

            let label_fg = if disabled {
                colors.text_secondary()
            } else if is_selected {
                colors.accent()
            } else {
                colors.fg()
            };
            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default().fg(label_fg).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_secondary()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}
