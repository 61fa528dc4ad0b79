use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats a major-unit amount as `$1,234.50` (negative: `-$1,234.50`).
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

/// Negative amounts (refunds, reversals) are highlighted.
#[must_use]
pub fn styled_amount(amount: f64, theme: &Theme) -> Span<'static> {
    let color = if amount < 0.0 {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(format_amount(amount), Style::default().fg(color))
}
