use anyhow::Result;
use chrono::Local;
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::engine;
use crate::models::{parse_date, Weekday, WorkoutEntry};
use crate::storage::Snapshot;

#[derive(Args)]
pub struct AgendaArgs {
    /// Day to resolve (YYYY-MM-DD, defaults to today)
    pub date: Option<String>,

    /// Only resolve this student
    #[arg(short, long)]
    pub student: Option<String>,
}

pub fn execute(args: AgendaArgs) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::open(&config);
    let store = snapshot.load()?;

    let date = match args.date {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };
    let day = Weekday::from_date(date);
    let date_format = config.ui.checked_date_format();
    println!(
        "{}",
        format!("Agenda for {} ({})", date.format(date_format), day).bold()
    );

    if let Some(name) = args.student {
        let matches = engine::resolve_day(&store, &name, date)?;
        if matches.is_empty() {
            println!("  No session for {}", name.bold());
        } else {
            print_sessions(&name, &matches);
        }
        return Ok(());
    }

    if store.is_empty() {
        println!("No students registered yet");
        return Ok(());
    }

    let mut sessions = 0;
    for student in store.students() {
        let matches = engine::resolve_day(&store, &student.name, date)?;
        sessions += matches.len();
        print_sessions(&student.name, &matches);
    }
    if sessions == 0 {
        println!("  No sessions on this day");
    }
    Ok(())
}

fn print_sessions(name: &str, matches: &[&WorkoutEntry]) {
    for entry in matches {
        println!("  {}: {}", name.bold(), entry.content);
    }
}
