mod cli;
mod config;
mod models;
mod progress;
mod schedule;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::Path;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use models::ScheduleEntry;
use schedule::get_schedule;
use store::CompletionStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;
    let data_file = config.data_file(cli.data_file.as_ref())?;

    let schedule = get_schedule();

    match cli.command {
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, &data_file, init)?;
        }
        Some(Commands::Schedule { week }) => {
            let store = open_store(&data_file, &schedule)?;
            handlers::handle_schedule(&schedule, store.state(), week)?;
        }
        Some(Commands::Mark { day, slot, undo }) => {
            let mut store = open_store(&data_file, &schedule)?;
            handlers::handle_mark(&mut store, &schedule, day, &slot, undo)?;
        }
        Some(Commands::Note { day, text, clear }) => {
            let mut store = open_store(&data_file, &schedule)?;
            handlers::handle_note(&mut store, &schedule, day, &text, clear)?;
        }
        Some(Commands::Progress) => {
            let store = open_store(&data_file, &schedule)?;
            handlers::handle_progress(&schedule, store.state(), &config)?;
        }
        Some(Commands::Export) => {
            let store = open_store(&data_file, &schedule)?;
            handlers::handle_export(&schedule, store.state(), &config)?;
        }

        // No subcommand → launch TUI
        None => {
            let store = open_store(&data_file, &schedule)?;
            tui::app::run(config, schedule, store)?;
        }
    }

    Ok(())
}

// A corrupt progress file stops here; it is never replaced with defaults.
fn open_store(data_file: &Path, schedule: &[ScheduleEntry]) -> Result<CompletionStore> {
    let store = CompletionStore::open(data_file, schedule).with_context(|| {
        format!(
            "Could not load progress from {:?}. Fix or move the file and try again",
            data_file
        )
    })?;
    info!("Using progress file {:?}", store.path());
    Ok(store)
}
