pub mod config;
pub mod schedule;
pub mod seed;
pub mod shell;
pub mod subject;
pub mod topic;

use std::error::Error;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: subject::SubjectAction,
    },
    /// Topic management within a subject
    Topic {
        #[command(subcommand)]
        action: topic::TopicAction,
    },
    /// Daily schedule and multi-day plans
    Schedule {
        #[command(subcommand)]
        action: schedule::ScheduleAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Add three sample subjects to try things out
    Seed,
    /// Interactive prompt accepting the same commands
    Shell,
}

/// Run one command against `session`.
pub fn dispatch(command: Commands, session: &mut Session) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Subject { action } => subject::run(action, session),
        Commands::Topic { action } => topic::run(action, session),
        Commands::Schedule { action } => schedule::run(action, session),
        Commands::Config { action } => config::run(action, session),
        Commands::Seed => seed::run(session),
        Commands::Shell => shell::run(session),
    }
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
