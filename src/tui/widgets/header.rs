use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::Subject;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect) {
    let title_line = Line::from(vec![Span::styled(
        "📚 45-Day Study Timetable",
        theme::bold().add_modifier(Modifier::BOLD),
    )]);

    let mut legend = Vec::new();
    for (i, subject) in Subject::all().into_iter().enumerate() {
        if i > 0 {
            legend.push(Span::styled("  |  ", theme::dim()));
        }
        legend.push(Span::styled("■ ", theme::subject(subject)));
        legend.push(Span::styled(subject.display_name(), theme::dim()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(legend)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
