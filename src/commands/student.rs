use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};

use crate::config::Config;
use crate::models::Weekday;
use crate::storage::Snapshot;

use super::format_days;

#[derive(Subcommand)]
pub enum StudentAction {
    /// Register a student, or update their training days
    Add {
        /// Student name
        name: String,

        /// Fixed training weekdays, comma separated (e.g. Segunda,Quarta);
        /// a bare --days clears the set
        #[arg(short, long, value_delimiter = ',', num_args = 0..)]
        days: Option<Vec<Weekday>>,
    },

    /// Remove a student and every workout registered for them
    Remove {
        /// Student name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List the roster with fixed training days
    List,
}

pub fn execute(action: StudentAction) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::open(&config);

    match action {
        StudentAction::Add { name, days } => add(&snapshot, name, days),
        StudentAction::Remove { name, force } => remove(&snapshot, name, force),
        StudentAction::List => list(&snapshot),
    }
}

fn add(snapshot: &Snapshot, name: String, days: Option<Vec<Weekday>>) -> Result<()> {
    let mut store = snapshot.load()?;

    let days = match days {
        Some(days) => days,
        None => prompt_days()?,
    };

    let updating = store.contains(&name);
    store.add_student(&name, days);
    snapshot.save(&store)?;

    let student = store.student(&name)?;
    if student.fixed_days.is_empty() {
        println!(
            "{} {} has no fixed training days; sessions stay off the agenda until days are added",
            "!".yellow(),
            student.name
        );
    }
    let action = if updating { "Updated" } else { "Registered" };
    println!(
        "{} {} {} ({})",
        "✓".green(),
        action,
        student.name.bold(),
        format_days(&student.fixed_days)
    );
    Ok(())
}

fn remove(snapshot: &Snapshot, name: String, force: bool) -> Result<()> {
    let mut store = snapshot.load()?;

    if !store.contains(&name) {
        println!("{} No student named {}", "✗".red(), name.bold());
        return Ok(());
    }

    if !force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Remove {name} and all their workouts?"))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    store.remove_student(&name);
    snapshot.save(&store)?;

    println!("{} Removed {}", "✓".green(), name.bold());
    Ok(())
}

fn list(snapshot: &Snapshot) -> Result<()> {
    let store = snapshot.load()?;

    if store.is_empty() {
        println!("No students registered yet");
        return Ok(());
    }

    println!("{}", "Students".bold());
    for student in store.students() {
        println!(
            "  {}: {}",
            student.name.bold(),
            format_days(&student.fixed_days)
        );
    }
    Ok(())
}

fn prompt_days() -> Result<Vec<Weekday>> {
    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Training days")
        .items(&Weekday::ALL)
        .interact()
        .context("Failed to read weekday selection")?;
    Ok(selection.into_iter().map(|i| Weekday::ALL[i]).collect())
}
