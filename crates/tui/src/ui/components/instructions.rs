use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::{components::card::Card, theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let lines = vec![
        Line::from(vec![
            Span::raw("Review expenses and mark them approved. Pick an employee with "),
            key("/"),
            Span::raw(" to narrow the list, "),
            key("Space"),
            Span::raw(" toggles the selected transaction."),
        ]),
        Line::from(Span::styled(
            "Approvals are kept for this session only.",
            Style::default().fg(theme.dim),
        )),
    ];

    let card = Card::new("Instructions", theme);
    card.render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: true }));
}
