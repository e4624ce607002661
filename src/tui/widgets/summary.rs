use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

use crate::models::{ProgressSummary, Subject, SubjectPlan};
use crate::tui::theme;
use crate::utils::format::{format_hours, format_minutes_range, format_percent, progress_bar};

/// One card per subject: planned hours, session count, progress bar.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    summary: &ProgressSummary,
    plans: &BTreeMap<Subject, SubjectPlan>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (subject, column) in Subject::all().into_iter().zip(columns.iter()) {
        let plan = plans.get(&subject).copied().unwrap_or_default();
        let progress = summary.subject(subject);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} {} ", subject.icon(), subject.display_name()),
                theme::subject(subject).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BORDER))
            .style(theme::surface());

        let bar_width = column.width.saturating_sub(4).min(30) as usize;
        let lines = vec![
            Line::from(Span::styled(
                format!("{} Hours", format_hours((plan.hours() * 10.0).round() / 10.0)),
                theme::bold(),
            )),
            Line::from(Span::styled(
                format!(
                    "{} Sessions × {}",
                    plan.sessions,
                    format_minutes_range(plan.min_session_minutes, plan.max_session_minutes)
                ),
                theme::dim(),
            )),
            Line::from(vec![
                Span::styled("Progress: ", theme::dim()),
                Span::styled(format_percent(progress.percent), theme::amber()),
            ]),
            Line::from(Span::styled(
                progress_bar(progress.ratio(), bar_width),
                theme::subject(subject),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, *column);
    }
}
