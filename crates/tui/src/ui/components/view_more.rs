use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Focus},
    ui::{components::card::Card, theme::Theme},
};

/// The button only exists while another page can be requested; it is dimmed
/// while that page is loading.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if !state.view.view_more_visible() {
        return;
    }

    let (label, style) = if state.view.view_more_enabled() {
        (
            "View More",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Loading...", Style::default().fg(theme.dim))
    };

    let card = Card::new("Pagination", theme).focused(state.focus == Focus::ViewMore);
    card.render_with(
        frame,
        area,
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center),
    );
}
