use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

use crate::config::{AppConfig, TotalsMode};
use crate::models::{ProgressSummary, ScheduleEntry, Slot, Subject, SubjectPlan};
use crate::progress::{compute_progress, subject_plans};
use crate::schedule::study_day_indices;
use crate::store::{CompletionStore, StoreError};
use crate::tui::events::{self, Event};
use crate::tui::theme;
use crate::tui::widgets::{chart, day, header, schedule, statusbar, summary};
use crate::utils::format::format_percent;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Progress,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    NotesInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status: Option<StatusMessage>,

    schedule: Vec<ScheduleEntry>,
    store: CompletionStore,
    study_rows: Vec<usize>,
    focus_idx: usize,

    // Recomputed after every change
    summary: ProgressSummary,
    plans: BTreeMap<Subject, SubjectPlan>,
}

impl App {
    pub fn new(config: AppConfig, schedule: Vec<ScheduleEntry>, mut store: CompletionStore) -> Self {
        store.materialize_defaults(&schedule);
        let study_rows = study_day_indices(&schedule);
        let summary = compute_progress(&schedule, store.state(), &config.progress);
        let plans = subject_plans(&schedule);

        App {
            view: View::Dashboard,
            config,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status: None,
            schedule,
            store,
            study_rows,
            focus_idx: 0,
            summary,
            plans,
        }
    }

    /// Entry index of the focused study day.
    pub fn selected_entry(&self) -> Option<usize> {
        self.study_rows.get(self.focus_idx).copied()
    }

    fn refresh(&mut self) {
        self.summary = compute_progress(&self.schedule, self.store.state(), &self.config.progress);
    }

    fn report(&mut self, result: Result<(), StoreError>, done: String) {
        self.status = Some(match result {
            Ok(()) => StatusMessage {
                text: done,
                is_error: false,
            },
            Err(e) => {
                warn!("{}", e);
                let text = if e.is_persistence() {
                    format!("Changes not saved: {}", e)
                } else {
                    e.to_string()
                };
                StatusMessage {
                    text,
                    is_error: true,
                }
            }
        });
        self.refresh();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses; some terminals also send release/repeat
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::NotesInput => self.handle_notes_input(key),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key),
                View::Progress => self.handle_progress_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('p') => {
                self.view = View::Progress;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus_idx + 1 < self.study_rows.len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::PageUp => {
                self.focus_idx = self.focus_idx.saturating_sub(6);
            }
            KeyCode::PageDown => {
                self.focus_idx = (self.focus_idx + 6).min(self.study_rows.len().saturating_sub(1));
            }
            KeyCode::Home => {
                self.focus_idx = 0;
            }
            KeyCode::End => {
                self.focus_idx = self.study_rows.len().saturating_sub(1);
            }
            KeyCode::Char('m') => self.toggle_focused(Slot::Morning),
            KeyCode::Char('e') => self.toggle_focused(Slot::Evening),
            KeyCode::Char('n') | KeyCode::Enter => {
                if let Some(idx) = self.selected_entry() {
                    self.input_buffer = self.store.get_notes(idx).to_string();
                    self.input_mode = InputMode::NotesInput;
                }
            }
            _ => {}
        }
    }

    fn handle_progress_key(&mut self, key: KeyEvent) {
        if let KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('q') = key.code {
            self.view = View::Dashboard;
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if let KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') = key.code {
            self.view = View::Dashboard;
        }
    }

    fn handle_notes_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            // Alt+Enter inserts a line break; plain Enter saves
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.input_buffer.push('\n');
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let text = std::mem::take(&mut self.input_buffer);
                if let Some(idx) = self.selected_entry() {
                    if text != self.store.get_notes(idx) {
                        let result = self.store.set_notes(idx, &text);
                        self.report(result, "Notes saved".to_string());
                    }
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn toggle_focused(&mut self, slot: Slot) {
        let Some(idx) = self.selected_entry() else {
            return;
        };
        let label = self.schedule[idx]
            .as_study_day()
            .and_then(|d| d.session(slot))
            .map(|s| s.label())
            .unwrap_or_default();
        let result = self.store.toggle_completion(idx, slot);
        let done = match &result {
            Ok(true) => format!("✓ {} done", label),
            _ => format!("{} cleared", label),
        };
        self.report(result.map(|_| ()), done);
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Progress => self.draw_progress(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(6), // subject cards
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0]);
        summary::render(frame, outer_chunks[1], &self.summary, &self.plans);
        statusbar::render(
            frame,
            outer_chunks[3],
            self.status.as_ref().map(|s| (s.text.as_str(), s.is_error)),
        );

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(9)])
            .split(outer_chunks[2]);

        let selected = self.selected_entry().unwrap_or(0);
        schedule::render(frame, body[0], &self.schedule, self.store.state(), selected);

        if let Some(study_day) = self.schedule.get(selected).and_then(|e| e.as_study_day()) {
            let editing =
                (self.input_mode == InputMode::NotesInput).then_some(self.input_buffer.as_str());
            day::render(frame, body[1], selected, study_day, self.store.state(), editing);
        }
    }

    fn draw_progress(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  📈 Progress Tracking  ", theme::accent().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let overall = &self.summary.overall;
        let mut lines = vec![Line::from(vec![
            Span::styled("  📚 Sessions Completed   ", theme::dim()),
            Span::styled(
                format!("{}/{}", overall.completed_count, overall.total_count),
                theme::bold(),
            ),
            Span::styled(
                format!("   {} Complete", format_percent(overall.percent)),
                theme::green(),
            ),
        ])];
        for subject in Subject::all() {
            let p = self.summary.subject(subject);
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} {:<20}", subject.icon(), format!("{} Sessions", subject.display_name())),
                    theme::dim(),
                ),
                Span::styled(format!("{}/{}", p.completed_count, p.total_count), theme::bold()),
                Span::styled(
                    format!("   {} Complete", format_percent(p.percent)),
                    theme::subject(subject),
                ),
            ]));
        }
        if self.config.progress.totals == TotalsMode::Configured {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Subject totals come from config; overall counts scheduled sessions",
                theme::dim(),
            )));
        }
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        chart::render(frame, chunks[2], &self.summary);

        let footer = Paragraph::new(Line::from(Span::styled(
            "Stay consistent, track your progress. Rest days are important for consolidation.",
            theme::dim().add_modifier(Modifier::ITALIC),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // At least 14 rows when the terminal has them, centred, never past the frame
        let height = (area.height / 2).max(14).min(area.height);
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height.saturating_sub(height) / 2,
            width: area.width / 2,
            height,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [↑↓] / [jk]  ", "Select day"),
            ("  [PgUp/PgDn]  ", "Jump a week"),
            ("  [m]          ", "Toggle morning session"),
            ("  [e]          ", "Toggle evening session"),
            ("  [n] / Enter  ", "Edit notes (Alt+Enter: new line)"),
            ("  [p]          ", "Progress view"),
            ("  [q] / Esc    ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::accent()),
                Span::styled(label, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            format!("  Progress file: {}", self.store.path().display()),
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(config: AppConfig, schedule: Vec<ScheduleEntry>, store: CompletionStore) -> Result<()> {
    let mut app = App::new(config, schedule, store);

    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        events::drain_pending()?;
        loop {
            terminal.draw(|frame| app.draw(frame))?;
            if let Event::Key(key) = events::next_event()? {
                app.handle_key(key);
                if app.should_quit {
                    break;
                }
            }
        }
        Ok(())
    })();
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::get_schedule;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let schedule = get_schedule();
        let store =
            CompletionStore::open(dir.path().join("timetable_data.json"), &schedule).unwrap();
        App::new(AppConfig::default(), schedule, store)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();
        for y in 0..height {
            let mut line = String::new();
            for x in 0..width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[test]
    fn focus_starts_on_first_study_day() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.selected_entry(), Some(1));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_entry(), Some(1));

        // skips the rest day at index 6
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_entry(), Some(7));

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_entry(), Some(47));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_entry(), Some(47));
    }

    #[test]
    fn toggle_updates_progress_and_disk() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.summary.api.completed_count, 1);
        assert!((app.summary.api.percent - 4.0).abs() < 1e-9);
        assert!(app.status.as_ref().is_some_and(|s| !s.is_error));

        let saved = CompletionStore::load(app.store.path()).unwrap();
        assert!(saved.is_completed(1, Slot::Morning));
        // defaults for every study day go out with the first write
        assert_eq!(saved.checkbox_states.len(), 72);
        assert_eq!(saved.notes.len(), 36);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.summary.overall.completed_count, 0);
    }

    #[test]
    fn notes_edit_saves_on_enter() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::NotesInput);
        type_text(&mut app, "chapter 2 done");
        // 'q' is text while editing
        type_text(&mut app, "q");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert_eq!(app.store.get_notes(1), "chapter 2 done");
        let saved = CompletionStore::load(app.store.path()).unwrap();
        assert_eq!(saved.note(1), "chapter 2 done");
    }

    #[test]
    fn notes_edit_cancel_discards() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.get_notes(1), "");
        assert!(!app.store.path().exists());
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timetable_data.json");
        let schedule = get_schedule();
        let store = CompletionStore::open(&path, &schedule).unwrap();
        let mut app = App::new(AppConfig::default(), schedule, store);

        // a non-empty directory in the file's place makes the rename fail
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "").unwrap();

        press(&mut app, KeyCode::Char('e'));
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Changes not saved"));
        assert!(!app.should_quit);
        assert_eq!(app.summary.overall.completed_count, 1);
    }

    #[test]
    fn help_overlay_fits_short_terminals() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);

        let screen = render_to_string(&app, 80, 16);
        assert!(screen.contains("Keybindings"), "{screen}");

        // smaller than the overlay's minimum height
        render_to_string(&app, 40, 6);
        render_to_string(&app, 120, 40);
    }

    #[test]
    fn views_switch_and_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.view, View::Progress);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn dashboard_renders_schedule_and_cards() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);
        let screen = render_to_string(&app, 160, 60);
        assert!(screen.contains("45-Day Study Timetable"), "{screen}");
        assert!(screen.contains("WEEK 1"), "{screen}");
        assert!(screen.contains("Day 1 (Monday)"), "{screen}");
        assert!(screen.contains("REST DAY"), "{screen}");
        assert!(screen.contains("Progress: 0.0%"), "{screen}");
    }

    #[test]
    fn progress_view_renders_counts() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('p'));
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("1/72"), "{screen}");
        assert!(screen.contains("1/25"), "{screen}");
    }
}
