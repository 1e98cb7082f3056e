use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How a workout entry repeats after its start date.
///
/// Wire names are the Portuguese labels of the workout files
/// (`Nunca`, `Semanal`, `Quinzenal`, `Mensal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatRule {
    /// One-off: occurs on the start date and never again.
    #[serde(rename = "Nunca")]
    Never,
    /// Every 7 days from the start date.
    #[serde(rename = "Semanal")]
    Weekly,
    /// Every 14 days from the start date.
    #[serde(rename = "Quinzenal")]
    Biweekly,
    /// Same day-of-month as the start date, from the start date on.
    /// Months without that day are skipped, so an entry anchored on the
    /// 31st never lands in a 30-day month.
    #[serde(rename = "Mensal")]
    Monthly,
}

impl RepeatRule {
    /// All rules, in the order the registration form offers them.
    pub const ALL: [RepeatRule; 4] = [
        RepeatRule::Never,
        RepeatRule::Weekly,
        RepeatRule::Biweekly,
        RepeatRule::Monthly,
    ];

    /// Canonical name, as stored in the workout files.
    pub fn name(&self) -> &'static str {
        match self {
            RepeatRule::Never => "Nunca",
            RepeatRule::Weekly => "Semanal",
            RepeatRule::Biweekly => "Quinzenal",
            RepeatRule::Monthly => "Mensal",
        }
    }

    /// Whether an entry anchored at `start` occurs on `date`.
    ///
    /// Matches are never backdated: no rule fires before its start date.
    pub fn matches(&self, start: NaiveDate, date: NaiveDate) -> bool {
        let diff = date.signed_duration_since(start).num_days();
        match self {
            RepeatRule::Never => date == start,
            RepeatRule::Weekly => diff >= 0 && diff % 7 == 0,
            RepeatRule::Biweekly => diff >= 0 && diff % 14 == 0,
            RepeatRule::Monthly => date >= start && date.day() == start.day(),
        }
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RepeatRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nunca" | "never" | "once" => Ok(RepeatRule::Never),
            "semanal" | "weekly" => Ok(RepeatRule::Weekly),
            "quinzenal" | "biweekly" | "fortnightly" => Ok(RepeatRule::Biweekly),
            "mensal" | "monthly" => Ok(RepeatRule::Monthly),
            _ => Err(anyhow::anyhow!("Unknown repeat rule: {}", s)),
        }
    }
}
