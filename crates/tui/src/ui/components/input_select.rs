use api_types::employee::Employee;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Focus},
    dashboard::all_employees,
    ui::{components::card::Card, theme::Theme},
};

const LABEL: &str = "Filter by employee";
const LOADING_LABEL: &str = "Loading employees...";
const MAX_DROPDOWN_ROWS: u16 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub value: String,
    pub label: String,
}

impl From<&Employee> for SelectItem {
    fn from(employee: &Employee) -> Self {
        Self {
            value: employee.id.clone(),
            label: employee.full_name(),
        }
    }
}

/// Searchable employee dropdown. Starts on the "All Employees" entry.
#[derive(Debug)]
pub struct InputSelectState {
    pub open: bool,
    pub query: String,
    pub highlighted: usize,
    pub selected: Employee,
}

impl Default for InputSelectState {
    fn default() -> Self {
        Self {
            open: false,
            query: String::new(),
            highlighted: 0,
            selected: all_employees(),
        }
    }
}

/// Choices offered by the dropdown: nothing until employees are loaded,
/// then the "All Employees" entry followed by every employee.
pub fn items(employees: Option<&[Employee]>) -> Vec<Employee> {
    match employees {
        None => Vec::new(),
        Some(employees) => std::iter::once(all_employees())
            .chain(employees.iter().cloned())
            .collect(),
    }
}

impl InputSelectState {
    pub fn matches<'a>(&self, items: &'a [Employee]) -> Vec<&'a Employee> {
        let query = self.query.trim().to_lowercase();
        items
            .iter()
            .filter(|item| {
                query.is_empty() || SelectItem::from(*item).label.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.highlighted = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    pub fn highlight_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1).min(len - 1);
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Closes the dropdown and returns the highlighted match, if any. `None`
    /// means the field was effectively cleared.
    pub fn commit(&mut self, items: &[Employee]) -> Option<Employee> {
        let choice = self.matches(items).get(self.highlighted).map(|e| (*e).clone());
        if let Some(employee) = &choice {
            self.selected = employee.clone();
        }
        self.close();
        choice
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (text, style) = if state.view.employees_loading {
        (LOADING_LABEL.to_string(), Style::default().fg(theme.dim))
    } else if state.select.open {
        let shown = if state.select.query.is_empty() {
            "type to search...".to_string()
        } else {
            state.select.query.clone()
        };
        (shown, Style::default().fg(theme.text))
    } else {
        (
            SelectItem::from(&state.select.selected).label,
            Style::default().fg(theme.text),
        )
    };

    let marker = if state.select.open { " ▲" } else { " ▼" };
    let line = Line::from(vec![
        Span::styled(text, style),
        Span::styled(marker, Style::default().fg(theme.accent)),
    ]);

    let card = Card::new(LABEL, theme)
        .focused(state.focus == Focus::Filter)
        .busy(state.view.employee_transactions_loading);
    card.render_with(frame, area, Paragraph::new(line));
}

/// Drawn last so the list overlaps the panels below the field.
pub fn render_dropdown(
    frame: &mut Frame<'_>,
    anchor: Rect,
    bounds: Rect,
    state: &AppState,
    theme: &Theme,
) {
    if !state.select.open {
        return;
    }

    let all = items(state.view.employees.as_deref());
    let matches = state.select.matches(&all);
    let rows = (matches.len().max(1) as u16).min(MAX_DROPDOWN_ROWS);
    let y = anchor.y + anchor.height;
    let height = (rows + 2).min(bounds.bottom().saturating_sub(y));
    let rect = Rect {
        x: anchor.x,
        y,
        width: anchor.width,
        height,
    };

    let list_items = if matches.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No matches",
            Style::default().fg(theme.dim),
        )))]
    } else {
        matches
            .iter()
            .map(|employee| {
                let item = SelectItem::from(*employee);
                let current = if item.value == state.select.selected.id {
                    " ✓"
                } else {
                    ""
                };
                ListItem::new(Line::from(format!("{}{current}", item.label)))
            })
            .collect()
    };

    let mut list_state = ListState::default();
    if !matches.is_empty() {
        list_state.select(Some(state.select.highlighted.min(matches.len() - 1)));
    }

    let list = List::new(list_items)
        .block(Card::new("Employees", theme).focused(true).block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(list, rect, &mut list_state);
}

#[cfg(test)]
mod tests {
    use crate::{dashboard::ALL_EMPLOYEES_ID, testing::employee};

    use super::*;

    fn staff() -> Vec<Employee> {
        let employees = vec![
            employee("e1", "Alice", "Smith"),
            employee("e2", "Bob", "Jones"),
            employee("e3", "Alicia", "Keys"),
        ];
        items(Some(employees.as_slice()))
    }

    #[test]
    fn no_items_until_employees_load() {
        assert!(items(None).is_empty());
    }

    #[test]
    fn sentinel_is_prepended() {
        let all = staff();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, ALL_EMPLOYEES_ID);
        assert_eq!(SelectItem::from(&all[0]).label, "All Employees");
        assert_eq!(
            SelectItem::from(&all[1]),
            SelectItem {
                value: "e1".to_string(),
                label: "Alice Smith".to_string()
            }
        );
    }

    #[test]
    fn defaults_to_all_employees() {
        let state = InputSelectState::default();
        assert_eq!(state.selected.id, ALL_EMPLOYEES_ID);
        assert!(!state.open);
    }

    #[test]
    fn search_is_case_insensitive() {
        let all = staff();
        let mut state = InputSelectState::default();
        state.open();
        for ch in "ALI".chars() {
            state.push(ch);
        }

        let labels = state
            .matches(&all)
            .iter()
            .map(|e| e.full_name())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Alice Smith", "Alicia Keys"]);
    }

    #[test]
    fn commit_selects_highlighted_match() {
        let all = staff();
        let mut state = InputSelectState::default();
        state.open();
        state.push('a');
        state.highlight_next(3);

        let choice = state.commit(&all).unwrap();
        assert_eq!(choice.id, "e1");
        assert_eq!(state.selected.id, "e1");
        assert!(!state.open);
        assert!(state.query.is_empty());
    }

    #[test]
    fn commit_without_match_returns_none_and_keeps_selection() {
        let all = staff();
        let mut state = InputSelectState::default();
        state.open();
        state.push('z');

        assert!(state.commit(&all).is_none());
        assert_eq!(state.selected.id, ALL_EMPLOYEES_ID);
    }

    #[test]
    fn highlight_stays_in_bounds() {
        let mut state = InputSelectState::default();
        state.highlight_prev();
        assert_eq!(state.highlighted, 0);
        state.highlight_next(2);
        state.highlight_next(2);
        assert_eq!(state.highlighted, 1);
        state.highlight_next(0);
        assert_eq!(state.highlighted, 1);
    }
}
