use ratatui::style::{Color, Modifier, Style};

use crate::models::Subject;

pub const BG: Color = Color::Rgb(20, 22, 30);
pub const SURFACE: Color = Color::Rgb(30, 33, 44);
pub const BORDER: Color = Color::Rgb(60, 64, 84);
pub const TEXT: Color = Color::Rgb(224, 226, 236);
pub const TEXT_DIM: Color = Color::Rgb(122, 126, 150);
pub const ACCENT: Color = Color::Rgb(118, 106, 226);
pub const GREEN: Color = Color::Rgb(39, 174, 96);
pub const AMBER: Color = Color::Rgb(255, 193, 7);
pub const RED: Color = Color::Rgb(220, 80, 70);
pub const DIVIDER: Color = Color::Rgb(44, 62, 80);

pub const API: Color = Color::Rgb(64, 120, 255);
pub const STATISTICS: Color = Color::Rgb(200, 200, 200);
pub const LLM: Color = Color::Rgb(230, 70, 70);

pub fn subject_color(subject: Subject) -> Color {
    match subject {
        Subject::Api => API,
        Subject::Statistics => STATISTICS,
        Subject::Llm => LLM,
    }
}

pub fn subject(subject: Subject) -> Style {
    Style::default().fg(subject_color(subject))
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn week_header() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(DIVIDER)
        .add_modifier(Modifier::BOLD)
}

pub fn rest_day() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC)
}
