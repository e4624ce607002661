use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Key hints, or the latest status message when there is one.
pub fn render(frame: &mut Frame, area: Rect, status: Option<(&str, bool)>) {
    let line = match status {
        Some((message, true)) => Line::from(Span::styled(format!("⚠ {}", message), theme::red())),
        Some((message, false)) => Line::from(Span::styled(message.to_string(), theme::green())),
        None => {
            let hints = [
                ("[↑↓]", " day  "),
                ("[m]", " morning  "),
                ("[e]", " evening  "),
                ("[n]", " notes  "),
                ("[p]", " progress  "),
                ("[?]", " help  "),
                ("[q]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(key, theme::accent()));
                spans.push(Span::styled(label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
