use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel around each dashboard section.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
    busy: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
            busy: false,
        }
    }

    /// Focused cards get the accent border and a bold title.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Appends a "fetching" marker to the title while a request for this
    /// section is in flight.
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    fn title(&self) -> Line<'a> {
        let mut title_style = Style::default().fg(self.theme.accent);
        if self.focused {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![Span::styled(format!(" {} ", self.title), title_style)];
        if self.busy {
            spans.push(Span::styled("fetching… ", Style::default().fg(self.theme.dim)));
        }
        Line::from(spans)
    }

    pub fn block(&self) -> Block<'a> {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(content, inner);
    }
}
