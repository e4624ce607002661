use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use crate::config::{AppConfig, TotalsMode};
use crate::models::{ProgressSummary, ScheduleEntry, Slot, StudyDay, Subject};
use crate::progress::{compute_progress, subject_plans};
use crate::schedule::{find_study_day, weeks};
use crate::store::{CompletionState, CompletionStore};
use crate::utils::format::{
    format_hours, format_minutes_range, format_percent, pad_width, progress_bar, truncate_width,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";

fn subject_color(subject: Subject) -> &'static str {
    match subject {
        Subject::Api => BLUE,
        Subject::Statistics => BOLD,
        Subject::Llm => RED,
    }
}

fn check_mark(done: bool) -> &'static str {
    if done { "✅" } else { "⬜" }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

pub fn handle_schedule(
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    week: Option<usize>,
) -> Result<()> {
    let groups = weeks(schedule);
    if let Some(n) = week {
        if n == 0 || n > groups.len() {
            bail!("Week must be between 1 and {}", groups.len());
        }
    }

    println!();
    println_colored!(BOLD, "  📅 Complete 45-Day Schedule");
    for (i, (label, rows)) in groups.iter().enumerate() {
        if week.is_some_and(|n| n != i + 1) {
            continue;
        }
        println!();
        println_colored!(AMBER, "  {}", label);
        for (idx, entry) in rows {
            match entry {
                ScheduleEntry::RestDay { day_label, date } => {
                    println_colored!(
                        DIM,
                        "  {} {:<7} REST DAY",
                        pad_width(day_label, 18),
                        date
                    );
                }
                ScheduleEntry::Study(day) => print_study_day(*idx, day, state),
                ScheduleEntry::WeekDivider { .. } => {}
            }
        }
    }
    println!();
    Ok(())
}

fn print_study_day(idx: usize, day: &StudyDay, state: &CompletionState) {
    let mut line = format!("  {} {:<7}", pad_width(&day.day_label, 18), day.date);
    for slot in Slot::all() {
        match day.session(slot) {
            Some(session) => {
                let _ = write!(
                    line,
                    " {} {}{}\x1b[0m",
                    check_mark(state.is_completed(idx, slot)),
                    subject_color(session.subject),
                    pad_width(&session.label(), 34)
                );
            }
            None => line.push_str(&" ".repeat(38)),
        }
    }
    let note = state.note(idx);
    if !note.is_empty() {
        let _ = write!(line, " {}{}\x1b[0m", DIM, truncate_width(note, 40));
    }
    println!("{}", line);
}

// ─── Mark / note ─────────────────────────────────────────────────────────────

fn resolve_day(schedule: &[ScheduleEntry], day: u32) -> Result<(usize, &StudyDay)> {
    find_study_day(schedule, day)
        .ok_or_else(|| anyhow!("Day {} is not a study day in this plan", day))
}

pub fn handle_mark(
    store: &mut CompletionStore,
    schedule: &[ScheduleEntry],
    day: u32,
    slot_str: &str,
    undo: bool,
) -> Result<()> {
    let slot = Slot::from_str(slot_str)
        .map_err(|_| anyhow!("Unknown slot '{}'. Use: morning, evening", slot_str))?;
    let (idx, study_day) = resolve_day(schedule, day)?;
    let session = study_day
        .session(slot)
        .ok_or_else(|| anyhow!("{} has no {} session", study_day.day_label, slot.as_str()))?;

    store
        .set_completion(idx, slot, !undo)
        .context("Saving progress")?;

    if undo {
        println_colored!(DIM, "  ⬜ {} cleared", session.label());
    } else {
        println_colored!(GREEN, "  ✓ {} marked as done", session.label());
    }
    Ok(())
}

pub fn handle_note(
    store: &mut CompletionStore,
    schedule: &[ScheduleEntry],
    day: u32,
    text: &[String],
    clear: bool,
) -> Result<()> {
    let (idx, study_day) = resolve_day(schedule, day)?;
    let text = if clear { String::new() } else { text.join(" ") };
    store.set_notes(idx, &text).context("Saving notes")?;

    if text.is_empty() {
        println_colored!(DIM, "  Notes cleared for {}", study_day.day_label);
    } else {
        println_colored!(GREEN, "  ✓ Notes saved for {}", study_day.day_label);
    }
    Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_progress(
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    config: &AppConfig,
) -> Result<()> {
    let summary = compute_progress(schedule, state, &config.progress);
    let plans = subject_plans(schedule);

    println!();
    println_colored!(BOLD, "  📚 45-Day Study Timetable");
    println_colored!(DIM, "  API | Statistics | LLM");
    println!();

    for subject in Subject::all() {
        let plan = plans.get(&subject).copied().unwrap_or_default();
        let progress = summary.subject(subject);
        println_colored!(
            subject_color(subject),
            "  {} {:<11} {:>5} hours  {} sessions × {}",
            subject.icon(),
            subject.display_name(),
            format_hours((plan.hours() * 10.0).round() / 10.0),
            plan.sessions,
            format_minutes_range(plan.min_session_minutes, plan.max_session_minutes)
        );
        println!(
            "     {}  {:>2}/{:<3} {}",
            progress_bar(progress.ratio(), 25),
            progress.completed_count,
            progress.total_count,
            format_percent(progress.percent)
        );
    }

    println!();
    println_colored!(BOLD, "  📈 Progress Tracking");
    println!(
        "  Sessions completed  {}/{}  ({} complete)",
        summary.overall.completed_count,
        summary.overall.total_count,
        format_percent(summary.overall.percent)
    );
    if config.progress.totals == TotalsMode::Configured {
        println_colored!(
            DIM,
            "  Subject percentages use the configured totals; overall uses the {} scheduled sessions",
            summary.overall.total_count
        );
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    config: &AppConfig,
) -> Result<()> {
    let summary = compute_progress(schedule, state, &config.progress);
    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    print!("{}", render_export(schedule, state, &summary, &generated));
    Ok(())
}

/// Markdown report: progress table followed by the schedule with marks.
pub fn render_export(
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    summary: &ProgressSummary,
    generated: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 45-Day Study Timetable");
    let _ = writeln!(out);
    let _ = writeln!(out, "_Generated {}_", generated);
    let _ = writeln!(out);
    let _ = writeln!(out, "## Progress");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Subject | Completed | Total | Progress |");
    let _ = writeln!(out, "|---|---|---|---|");
    for subject in Subject::all() {
        let p = summary.subject(subject);
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            subject.display_name(),
            p.completed_count,
            p.total_count,
            format_percent(p.percent)
        );
    }
    let o = &summary.overall;
    let _ = writeln!(
        out,
        "| **Overall** | {} | {} | {} |",
        o.completed_count,
        o.total_count,
        format_percent(o.percent)
    );

    for (label, rows) in weeks(schedule) {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", label);
        let _ = writeln!(out);
        for (idx, entry) in rows {
            match entry {
                ScheduleEntry::RestDay { day_label, date } => {
                    let _ = writeln!(out, "- {} ({}): rest day", day_label, date);
                }
                ScheduleEntry::Study(day) => {
                    let _ = writeln!(out, "- {} ({})", day.day_label, day.date);
                    for slot in Slot::all() {
                        if let Some(session) = day.session(slot) {
                            let mark = if state.is_completed(idx, slot) { "x" } else { " " };
                            let _ = writeln!(
                                out,
                                "  - [{}] {}: {}",
                                mark,
                                slot.display_name(),
                                session.label()
                            );
                        }
                    }
                    let note = state.note(idx);
                    if !note.is_empty() {
                        let _ = writeln!(out, "  - Notes: {}", note.replace('\n', " "));
                    }
                }
                ScheduleEntry::WeekDivider { .. } => {}
            }
        }
    }
    out
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, data_file: &Path, init: bool) -> Result<()> {
    let config_path = AppConfig::config_path()?;
    if init {
        if config_path.exists() {
            println_colored!(DIM, "  Config already exists at {:?}", config_path);
        } else {
            let path = config.save()?;
            println_colored!(GREEN, "  ✓ Wrote default config to {:?}", path);
        }
    }

    println!();
    println_colored!(BOLD, "  Config file:   {:?}", config_path);
    println_colored!(BOLD, "  Progress file: {:?}", data_file);
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
