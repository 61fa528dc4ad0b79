use ratatui::{style::Style, text::Span};

use crate::{app::Focus, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for the focused section, or for the open dropdown.
pub fn context_hints(focus: Focus, dropdown_open: bool) -> Vec<KeyHint> {
    if dropdown_open {
        return vec![
            KeyHint::new("type", "search"),
            KeyHint::new("↑↓", "move"),
            KeyHint::new("Enter", "select"),
            KeyHint::new("Esc", "close"),
        ];
    }

    match focus {
        Focus::Filter => vec![KeyHint::new("Enter", "open"), KeyHint::new("/", "search")],
        Focus::Transactions => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("Space", "toggle approval"),
        ],
        Focus::ViewMore => vec![KeyHint::new("Enter", "view more")],
    }
}

pub fn global_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "focus"),
        KeyHint::new("m", "more"),
        KeyHint::new("r", "retry"),
        KeyHint::new("q", "quit"),
    ]
}
