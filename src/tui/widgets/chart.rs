use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders},
    Frame,
};

use crate::models::{ProgressSummary, Subject};
use crate::tui::theme;
use crate::utils::format::format_percent;

/// Bar per subject, 0-100%.
pub fn render(frame: &mut Frame, area: Rect, summary: &ProgressSummary) {
    let block = Block::default()
        .title(Span::styled(" 📊 Subject Progress Overview ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let bars: Vec<Bar> = Subject::all()
        .into_iter()
        .map(|subject| {
            let percent = summary.subject(subject).percent;
            Bar::default()
                .value(percent.round().clamp(0.0, 100.0) as u64)
                .text_value(format_percent(percent))
                .label(Line::from(subject.display_name()))
                .style(theme::subject(subject))
                .value_style(
                    Style::default()
                        .fg(theme::BG)
                        .bg(theme::subject_color(subject))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(6)
        .max(100);

    frame.render_widget(chart, area);
}
