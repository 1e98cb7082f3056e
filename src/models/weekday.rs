use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Day of the week, Monday-first.
///
/// Canonical names are the Portuguese labels used in the agenda data files
/// (`Segunda` through `Domingo`). Parsing also accepts unaccented spellings,
/// the long `-feira` forms and English names, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Segunda")]
    Monday,
    #[serde(rename = "Terça")]
    Tuesday,
    #[serde(rename = "Quarta")]
    Wednesday,
    #[serde(rename = "Quinta")]
    Thursday,
    #[serde(rename = "Sexta")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
    #[serde(rename = "Domingo")]
    Sunday,
}

impl Weekday {
    /// All seven days, Monday-first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical display name, as stored in the data files.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Segunda",
            Weekday::Tuesday => "Terça",
            Weekday::Wednesday => "Quarta",
            Weekday::Thursday => "Quinta",
            Weekday::Friday => "Sexta",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }

    /// Weekday of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "segunda" | "segunda-feira" | "monday" | "mon" => Ok(Weekday::Monday),
            "terça" | "terca" | "terça-feira" | "terca-feira" | "tuesday" | "tue" => {
                Ok(Weekday::Tuesday)
            }
            "quarta" | "quarta-feira" | "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "quinta" | "quinta-feira" | "thursday" | "thu" => Ok(Weekday::Thursday),
            "sexta" | "sexta-feira" | "friday" | "fri" => Ok(Weekday::Friday),
            "sábado" | "sabado" | "saturday" | "sat" => Ok(Weekday::Saturday),
            "domingo" | "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => Err(ScheduleError::InvalidWeekday(s.to_string())),
        }
    }
}
