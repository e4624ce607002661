use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{ScheduleEntry, Slot};
use crate::store::CompletionState;
use crate::tui::theme;
use crate::utils::format::{pad_width, truncate_width};

fn check(done: bool) -> Span<'static> {
    if done {
        Span::styled("✓ ", theme::green().add_modifier(Modifier::BOLD))
    } else {
        Span::styled("☐ ", theme::dim())
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    selected_entry: usize,
) {
    let block = Block::default()
        .title(Span::styled(" 📅 Schedule ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let note_width = area.width.saturating_sub(100) as usize;

    let items: Vec<ListItem> = schedule
        .iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            ScheduleEntry::WeekDivider { week_label } => {
                ListItem::new(Line::from(Span::styled(
                    format!(" {} ", week_label),
                    theme::week_header(),
                )))
            }
            ScheduleEntry::RestDay { day_label, date } => ListItem::new(Line::from(vec![
                Span::styled(format!("  {}", pad_width(day_label, 18)), theme::rest_day()),
                Span::styled(format!("{:<8}", date), theme::rest_day()),
                Span::styled("REST DAY", theme::rest_day()),
            ])),
            ScheduleEntry::Study(day) => {
                let mut spans = vec![
                    Span::styled(format!("  {}", pad_width(&day.day_label, 18)), theme::bold()),
                    Span::styled(format!("{:<8}", day.date), theme::dim()),
                ];
                for slot in Slot::all() {
                    match day.session(slot) {
                        Some(session) => {
                            spans.push(check(state.is_completed(idx, slot)));
                            spans.push(Span::styled(
                                pad_width(&session.label(), 36),
                                theme::subject(session.subject),
                            ));
                        }
                        None => spans.push(Span::raw(" ".repeat(38))),
                    }
                }
                let note = state.note(idx);
                if note_width > 3 && !note.is_empty() {
                    spans.push(Span::styled(truncate_width(note, note_width), theme::dim()));
                }
                ListItem::new(Line::from(spans))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme::BORDER).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸");

    let mut list_state = ListState::default().with_selected(Some(selected_entry));
    frame.render_stateful_widget(list, area, &mut list_state);
}
