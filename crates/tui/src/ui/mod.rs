pub mod components;
pub mod keymap;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(4), // Instructions
            Constraint::Length(3), // Employee filter
            Constraint::Min(5),    // Transactions
            Constraint::Length(3), // View More
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::instructions::render(frame, layout[1], &theme);
    components::input_select::render(frame, layout[2], state, &theme);
    components::transactions::render(frame, layout[3], state, &theme);
    components::view_more::render(frame, layout[4], state, &theme);
    render_bottom_bar(frame, layout[5], state, &theme);

    components::input_select::render_dropdown(frame, layout[2], area, state, &theme);
    components::toast::render(frame, area, &state.view.errors);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let view = &state.view;
    let scope = if view.is_employee_filtered {
        state.select.selected.full_name()
    } else {
        "All".to_string()
    };
    let busy = view.employees_loading
        || view.transactions_loading
        || view.employee_transactions_loading;
    let (status, status_style) = if !view.errors.is_empty() {
        ("ERR", Style::default().fg(theme.error))
    } else if busy {
        ("…", Style::default().fg(theme.accent))
    } else {
        ("OK", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.source)),
        Span::styled("Scope", Style::default().fg(theme.dim)),
        Span::raw(format!(": {scope}  ")),
        Span::styled("Approved", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", approved_summary(state))),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn approved_summary(state: &AppState) -> String {
    match &state.view.transactions {
        Some(rows) => {
            let approved = rows.iter().filter(|row| row.approved).count();
            format!("{approved}/{}", rows.len())
        }
        None => "-".to_string(),
    }
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(
        &components::hints::context_hints(state.focus, state.select.open),
        theme,
    );
    if !state.select.open {
        parts.push(components::hints::hint_separator(theme));
        parts.extend(components::hints::hints_to_spans(
            &components::hints::global_hints(),
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
