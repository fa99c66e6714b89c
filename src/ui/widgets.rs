//! Custom widgets for the flashcard TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{icons, Theme};
use crate::models::CardType;
use crate::session::CurrentCard;

// ══════════════════════════════════════════════════════════════════════════
// Filter Tabs Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct FilterTabs<'a> {
    selected: CardType,
    theme: &'a Theme,
}

impl<'a> FilterTabs<'a> {
    pub fn new(selected: CardType, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for FilterTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, kind) in CardType::all().iter().enumerate() {
            let style = if *kind == self.selected {
                self.theme.tab_active()
            } else {
                self.theme.tab_inactive()
            };
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!(" {} {} ", i + 1, kind.display_name()), style));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Flashcard Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct FlashcardWidget<'a> {
    card: CurrentCard<'a>,
    theme: &'a Theme,
}

impl<'a> FlashcardWidget<'a> {
    pub fn new(card: CurrentCard<'a>, theme: &'a Theme) -> Self {
        Self { card, theme }
    }
}

impl Widget for FlashcardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.card_border())
            .style(Style::default().bg(self.theme.colors.bg_card))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.card.counter(), self.theme.meta()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),       // Meta
            Constraint::Percentage(50),  // Chinese
            Constraint::Min(3),          // English or hint
        ])
        .split(inner);

        let category = self.card.category.unwrap_or(icons::EMPTY);
        let width = chunks[0].width as usize;
        let meta = Line::from(vec![
            Span::styled(truncate_to_width(category, width / 2), self.theme.meta()),
            Span::raw("  ·  "),
            Span::styled(truncate_to_width(self.card.kind, width / 2), self.theme.meta()),
        ]);
        Paragraph::new(meta)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        render_centered(self.card.chinese, self.theme.prompt(), chunks[1], buf);

        match self.card.english {
            Some(english) => {
                let panel = Block::default()
                    .borders(Borders::TOP)
                    .border_style(self.theme.card_border())
                    .title(Span::styled(" English ", self.theme.answer()))
                    .title_alignment(Alignment::Center);
                let panel_inner = panel.inner(chunks[2]);
                panel.render(chunks[2], buf);
                render_centered(english, self.theme.answer(), panel_inner, buf);
            }
            None => {
                render_centered("Press Space to show English", self.theme.hint(), chunks[2], buf);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Message Widget
// ══════════════════════════════════════════════════════════════════════════

/// A bordered notice used for the "no cards" and "load failed" screens.
pub struct MessageWidget<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
    is_error: bool,
    theme: &'a Theme,
}

impl<'a> MessageWidget<'a> {
    pub fn new(title: &'a str, lines: Vec<Line<'a>>, is_error: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            lines,
            is_error,
            theme,
        }
    }
}

impl Widget for MessageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.is_error {
            self.theme.colors.error
        } else {
            self.theme.colors.warning
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.title, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let height = self.lines.len() as u16;
        let top = inner.height.saturating_sub(height) / 2;
        let text_area = Rect {
            y: inner.y + top,
            height: inner.height.saturating_sub(top),
            ..inner
        };

        Paragraph::new(self.lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(self.theme.colors.text))
            .render(text_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let last = self.hints.len().saturating_sub(1);
        let spans: Vec<Span> = self
            .hints
            .iter()
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let mut parts = vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                ];
                if i < last {
                    parts.push(Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)));
                }
                parts
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════

/// Render wrapped text centered both ways. Width is measured in terminal
/// columns so CJK text gets two columns per character.
fn render_centered(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let width = area.width.saturating_sub(4).max(1) as usize;
    let rows = text
        .lines()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum::<usize>() as u16;
    let top = area.height.saturating_sub(rows) / 2;

    let text_area = Rect {
        x: area.x + 2,
        y: area.y + top,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(top),
    };

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(style)
        .render(text_area, buf);
}

/// Cut `text` to at most `max` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
