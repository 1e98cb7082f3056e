use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::config::Config;
use crate::models::{parse_date, RepeatRule, Student, Weekday, WorkoutEntry};
use crate::storage::Snapshot;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Register a workout entry for a student
    Add {
        /// Student name
        student: String,

        /// Weekday the entry belongs to
        #[arg(short, long)]
        day: Option<Weekday>,

        /// Repetition rule (Nunca, Semanal, Quinzenal, Mensal)
        #[arg(short, long)]
        rule: Option<RepeatRule>,

        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,

        /// Workout text
        #[arg(short, long)]
        content: Option<String>,
    },

    /// List a student's registered workout entries
    List {
        /// Student name
        student: String,

        /// Only show this weekday
        #[arg(short, long)]
        day: Option<Weekday>,
    },
}

pub fn execute(action: WorkoutAction) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::open(&config);

    match action {
        WorkoutAction::Add {
            student,
            day,
            rule,
            start,
            content,
        } => add(&snapshot, student, day, rule, start, content),
        WorkoutAction::List { student, day } => list(&snapshot, &config, student, day),
    }
}

fn add(
    snapshot: &Snapshot,
    student: String,
    day: Option<Weekday>,
    rule: Option<RepeatRule>,
    start: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let mut store = snapshot.load()?;
    let student = store.student(&student)?.clone();

    let day = match day {
        Some(day) => day,
        None => prompt_day(&student)?,
    };
    if !student.trains_on(day) {
        println!(
            "{} {} is not one of {}'s fixed days; the entry stays dormant until the day is added",
            "!".yellow(),
            day,
            student.name
        );
    }

    let rule = match rule {
        Some(rule) => rule,
        None => prompt_rule()?,
    };

    let start_date = match start {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };

    let content = match content {
        Some(content) => content,
        None => prompt_content()?,
    };
    if content.trim().is_empty() {
        anyhow::bail!("Workout content cannot be empty");
    }

    store.add_entry(
        &student.name,
        day,
        WorkoutEntry::new(content, rule, start_date),
    )?;
    snapshot.save(&store)?;

    println!(
        "{} Registered {} workout for {} on {}",
        "✓".green(),
        rule,
        student.name.bold(),
        day
    );
    Ok(())
}

fn list(snapshot: &Snapshot, config: &Config, student: String, day: Option<Weekday>) -> Result<()> {
    let store = snapshot.load()?;
    let student = store.student(&student)?;

    println!("{}", format!("Workouts for {}", student.name).bold());
    let date_format = config.ui.checked_date_format();
    let mut shown = 0;
    for (slot, entries) in store.weekday_entries(&student.name) {
        if day.is_some_and(|want| want != slot) {
            continue;
        }
        for entry in entries {
            println!(
                "  {}: {} ({}, {})",
                slot.to_string().cyan(),
                entry.content,
                entry.rule,
                entry.start_date.format(date_format)
            );
            shown += 1;
        }
    }
    if shown == 0 {
        println!("  (none)");
    }
    Ok(())
}

fn prompt_day(student: &Student) -> Result<Weekday> {
    let choices: &[Weekday] = if student.fixed_days.is_empty() {
        &Weekday::ALL
    } else {
        &student.fixed_days
    };
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Weekday")
        .items(choices)
        .default(0)
        .interact()
        .context("Failed to read weekday")?;
    Ok(choices[index])
}

fn prompt_rule() -> Result<RepeatRule> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Repeats")
        .items(&RepeatRule::ALL)
        .default(0)
        .interact()
        .context("Failed to read repeat rule")?;
    Ok(RepeatRule::ALL[index])
}

fn prompt_content() -> Result<String> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Workout")
        .interact_text()
        .context("Failed to read workout text")
}
