use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, author, about = "Track a 45-day API | Statistics | LLM study plan")]
pub struct Cli {
    /// Progress file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full schedule with completion marks and notes
    Schedule {
        /// Only show one week (1-6, 6 = final days)
        #[arg(long)]
        week: Option<usize>,
    },
    /// Mark a session as completed
    Mark {
        /// Plan day number (e.g. 7 for "Day 7")
        day: u32,
        /// morning or evening
        slot: String,
        /// Clear the mark instead of setting it
        #[arg(long)]
        undo: bool,
    },
    /// Set or clear the notes for a day
    Note {
        /// Plan day number
        day: u32,
        /// Note text
        #[arg(required_unless_present = "clear", num_args = 1..)]
        text: Vec<String>,
        /// Clear the note
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Show per-subject and overall progress
    Progress,
    /// Export a Markdown progress report to stdout
    Export,
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}
