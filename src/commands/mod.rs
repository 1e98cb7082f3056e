pub mod agenda;
pub mod calendar;
pub mod config_cmd;
pub mod student;
pub mod workout;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::models::Weekday;

/// Weekly training agenda for personal trainers
#[derive(Parser)]
#[command(name = "trainer-agenda")]
#[command(about = "Weekly training agenda for personal trainers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the student roster
    Student {
        #[command(subcommand)]
        action: student::StudentAction,
    },

    /// Register and inspect workout entries
    Workout {
        #[command(subcommand)]
        action: workout::WorkoutAction,
    },

    /// Show who trains on a given day and what they do
    Agenda(agenda::AgendaArgs),

    /// Resolve every session across a date range
    Calendar(calendar::CalendarArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config_cmd::ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Execute the parsed command
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Student { action } => student::execute(action),
        Commands::Workout { action } => workout::execute(action),
        Commands::Agenda(args) => agenda::execute(args),
        Commands::Calendar(args) => calendar::execute(args),
        Commands::Config { action } => config_cmd::execute(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Render a weekday list the way the roster shows it.
pub(crate) fn format_days(days: &[Weekday]) -> String {
    if days.is_empty() {
        return "no fixed days".to_string();
    }
    days.iter()
        .map(Weekday::name)
        .collect::<Vec<_>>()
        .join(", ")
}
