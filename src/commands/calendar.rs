use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::engine::{self, CalendarEvent, Occurrence};
use crate::models::{parse_date, Weekday};
use crate::storage::Snapshot;

#[derive(Args)]
pub struct CalendarArgs {
    /// Range start (YYYY-MM-DD, defaults to January 1 of the current year)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD, defaults to January 1 of the next year)
    #[arg(long)]
    pub to: Option<String>,

    /// Emit the event feed as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: CalendarArgs) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::open(&config);
    let store = snapshot.load()?;

    let today = Local::now().date_naive();
    let from = match args.from {
        Some(raw) => parse_date(&raw)?,
        None => NaiveDate::from_ymd_opt(today.year(), 1, 1).context("Invalid range start")?,
    };
    let to = match args.to {
        Some(raw) => parse_date(&raw)?,
        None => NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).context("Invalid range end")?,
    };

    let occurrences = engine::resolve_range(&store, from, to);

    if args.json {
        let events: Vec<CalendarEvent> = occurrences.iter().map(Occurrence::to_event).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&events).context("Failed to serialize event feed")?
        );
        return Ok(());
    }

    let date_format = config.ui.checked_date_format();
    println!(
        "{}",
        format!(
            "Sessions from {} to {}",
            from.format(date_format),
            to.format(date_format)
        )
        .bold()
    );
    if occurrences.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    let mut current = None;
    for occurrence in &occurrences {
        if current != Some(occurrence.date) {
            current = Some(occurrence.date);
            println!(
                "{}",
                format!(
                    "{} ({})",
                    occurrence.date.format(date_format),
                    Weekday::from_date(occurrence.date)
                )
                .cyan()
            );
        }
        println!(
            "  {}: {}",
            occurrence.student.bold(),
            occurrence.entry.content
        );
    }
    Ok(())
}
