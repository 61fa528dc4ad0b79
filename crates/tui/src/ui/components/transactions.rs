use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, Focus},
    dashboard::TransactionRow,
    ui::{
        components::{card::Card, money::styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Transactions;
    let title = match &state.view.transactions {
        Some(rows) if state.view.is_employee_filtered => {
            format!("Transactions · {} · {}", state.select.selected.full_name(), rows.len())
        }
        Some(rows) => format!("Transactions · {}", rows.len()),
        None => "Transactions".to_string(),
    };
    let card = Card::new(&title, theme)
        .focused(focused)
        .busy(state.view.transactions_loading || state.view.employee_transactions_loading);

    let Some(rows) = &state.view.transactions else {
        card.render_with(
            frame,
            area,
            Paragraph::new(Line::from("Loading...")).alignment(Alignment::Center),
        );
        return;
    };

    if rows.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Line::from(Span::styled(
                "No transactions",
                Style::default().fg(theme.dim),
            )))
            .alignment(Alignment::Center),
        );
        return;
    }

    let header = Row::new(["", "Merchant", "Employee", "Date", "Amount"])
        .style(Style::default().fg(theme.dim));
    let table = Table::new(
        rows.iter().map(|row| table_row(row, theme)),
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Length(11),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(card.block())
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if focused {
        table_state.select(Some(state.selected_row.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn table_row<'a>(row: &'a TransactionRow, theme: &Theme) -> Row<'a> {
    let tx = &row.transaction;
    let (mark, mark_style) = if row.approved {
        ("[x]", Style::default().fg(theme.positive))
    } else {
        ("[ ]", Style::default().fg(theme.dim))
    };

    Row::new(vec![
        Cell::from(Span::styled(mark, mark_style)),
        Cell::from(tx.merchant.as_str()),
        Cell::from(tx.employee.full_name()),
        Cell::from(tx.date.format("%Y-%m-%d").to_string()),
        Cell::from(styled_amount(tx.amount, theme)),
    ])
}
