use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// Bottom-right error box listing the failures of the last requests.
pub fn render(frame: &mut Frame<'_>, area: Rect, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    let theme = Theme::default();
    let longest = errors.iter().map(|err| err.chars().count()).max().unwrap_or(0);
    let width = (longest + 4).min(area.width as usize) as u16;
    let height = (errors.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect {
        x,
        y,
        width,
        height,
    };

    let style = Style::default().fg(theme.error);
    let lines = errors
        .iter()
        .map(|err| Line::from(err.as_str()))
        .collect::<Vec<_>>();

    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).style(style).block(block), rect);
}
