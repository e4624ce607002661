use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{Slot, StudyDay};
use crate::store::CompletionState;
use crate::tui::theme;

/// Progress and notes for the selected day. `editing` holds the notes buffer
/// while the user is typing.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entry_index: usize,
    day: &StudyDay,
    state: &CompletionState,
    editing: Option<&str>,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} - {} ", day.day_label, day.date),
            theme::accent().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if editing.is_some() {
            theme::amber()
        } else {
            Style::default().fg(theme::BORDER)
        })
        .style(theme::surface());

    let mut lines = Vec::new();
    for slot in Slot::all() {
        let Some(session) = day.session(slot) else {
            continue;
        };
        let (icon, style) = if state.is_completed(entry_index, slot) {
            ("✅", theme::green())
        } else {
            ("⬜", theme::dim())
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", icon), style),
            Span::styled(format!("{}: ", slot.display_name()), theme::dim()),
            Span::styled(session.label(), theme::subject(session.subject)),
        ]));
    }
    lines.push(Line::from(""));

    match editing {
        Some(buffer) => {
            lines.push(Line::from(Span::styled(
                " Notes (Enter save · Esc cancel)",
                theme::amber(),
            )));
            for (i, text) in buffer.split('\n').enumerate() {
                let prefix = if i == 0 { " > " } else { "   " };
                lines.push(Line::from(vec![
                    Span::styled(prefix, theme::amber()),
                    Span::styled(text.to_string(), theme::bold()),
                ]));
            }
            if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled("█", theme::amber()));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(" Notes", theme::dim())));
            let note = state.note(entry_index);
            if note.is_empty() {
                lines.push(Line::from(Span::styled(
                    "   Add your notes or review here... [n]",
                    theme::dim().add_modifier(Modifier::ITALIC),
                )));
            } else {
                for text in note.split('\n') {
                    lines.push(Line::from(Span::styled(format!("   {}", text), theme::bold())));
                }
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
