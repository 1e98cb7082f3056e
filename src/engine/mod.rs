use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Student, Weekday, WorkoutEntry};
use crate::store::ScheduleStore;

/// One resolved session: a student, a calendar day and the entry that
/// recurs onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub date: NaiveDate,
    pub student: &'a str,
    pub entry: &'a WorkoutEntry,
}

/// Event-feed record consumed by external calendar renderers, one per
/// resolved session: `{"title", "start", "end", "extendedProps": {"treino"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(rename = "extendedProps")]
    pub extended_props: EventProps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProps {
    #[serde(rename = "treino")]
    pub workout: String,
}

impl Occurrence<'_> {
    /// Owned event record for the calendar feed.
    pub fn to_event(&self) -> CalendarEvent {
        CalendarEvent {
            title: self.student.to_string(),
            start: self.date,
            end: self.date,
            extended_props: EventProps {
                workout: self.entry.content.clone(),
            },
        }
    }
}

/// Workouts occurring for one student on one calendar day.
///
/// The student's fixed weekday set is a hard gate: when the day's weekday
/// is outside it, the result is empty no matter what entries are
/// registered. Past the gate, every entry of the (student, weekday) slot is
/// evaluated and all that recur onto `date` are returned, in registration
/// order. Fails with [`ScheduleError::UnknownStudent`] for names outside
/// the roster.
pub fn resolve_day<'a>(
    store: &'a ScheduleStore,
    student: &str,
    date: NaiveDate,
) -> Result<Vec<&'a WorkoutEntry>, ScheduleError> {
    let student = store.student(student)?;
    Ok(matches_for(store, student, date).collect())
}

/// Every session for every rostered student across `[from, to]`, both ends
/// inclusive. Empty when `from > to`.
///
/// Ordered by date ascending, then roster order, then entry registration
/// order, so repeated calls over an unchanged store render identically.
pub fn resolve_range<'a>(
    store: &'a ScheduleStore,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<Occurrence<'a>> {
    let mut occurrences = Vec::new();
    for date in from.iter_days().take_while(|d| *d <= to) {
        for student in store.students() {
            for entry in matches_for(store, student, date) {
                occurrences.push(Occurrence {
                    date,
                    student: &student.name,
                    entry,
                });
            }
        }
    }
    occurrences
}

/// Matching entries for an already-resolved student.
fn matches_for<'a>(
    store: &'a ScheduleStore,
    student: &'a Student,
    date: NaiveDate,
) -> impl Iterator<Item = &'a WorkoutEntry> + 'a {
    let day = Weekday::from_date(date);
    let entries: &'a [WorkoutEntry] = if student.trains_on(day) {
        store.entries(&student.name, day)
    } else {
        &[]
    };
    entries.iter().filter(move |e| e.occurs_on(date))
}
