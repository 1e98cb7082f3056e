use thiserror::Error;

/// Errors surfaced by the schedule store and the recurrence engine.
///
/// Every operation either fully succeeds or leaves the store untouched;
/// callers never need to roll back after one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The referenced student name is not registered.
    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    /// A weekday string outside the recognized set of seven.
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    /// A date string that does not parse as a calendar date.
    #[error("Malformed date: {0}")]
    MalformedDate(String),
}
