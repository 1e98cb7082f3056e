// Domain vocabulary: weekdays, repeat rules, students, workout entries.

pub mod recurrence;
pub mod student;
pub mod weekday;
pub mod workout;

pub use recurrence::RepeatRule;
pub use student::Student;
pub use weekday::Weekday;
pub use workout::WorkoutEntry;

use chrono::NaiveDate;

use crate::error::ScheduleError;

/// Wire format for calendar dates in the agenda data files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ScheduleError::MalformedDate(s.to_string()))
}
