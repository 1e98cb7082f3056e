use std::collections::BTreeMap;

use crate::error::ScheduleError;
use crate::models::{Student, Weekday, WorkoutEntry};

/// In-memory schedule: the student roster plus every registered workout
/// entry, keyed by (student, weekday).
///
/// Roster order is registration order and is observable: range resolution
/// and the saved student registry both follow it. Mutations either fully
/// succeed or leave the store untouched.
///
/// Entries may exist for names no longer in the roster (hand-edited data
/// files). They are kept, invisible to resolution until the student is
/// registered again, and written back on save.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    students: Vec<Student>,
    workouts: BTreeMap<String, BTreeMap<Weekday, Vec<WorkoutEntry>>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from loaded snapshot parts.
    pub(crate) fn from_parts(
        students: Vec<Student>,
        workouts: BTreeMap<String, BTreeMap<Weekday, Vec<WorkoutEntry>>>,
    ) -> Self {
        Self { students, workouts }
    }

    /// Register a student, or replace the weekday set of an existing one.
    ///
    /// Re-registration keeps the student's roster position and leaves their
    /// workout entries in place.
    pub fn add_student(&mut self, name: &str, fixed_days: Vec<Weekday>) {
        let student = Student::new(name.to_string(), fixed_days);
        tracing::debug!(student = %student.name, days = student.fixed_days.len(), "registering student");
        match self.students.iter_mut().find(|s| s.name == student.name) {
            Some(existing) => existing.fixed_days = student.fixed_days,
            None => self.students.push(student),
        }
    }

    /// Delete a student and every workout entry registered for them.
    ///
    /// Returns `false` when the name is not in the roster; nothing is
    /// touched in that case.
    pub fn remove_student(&mut self, name: &str) -> bool {
        let Some(pos) = self.students.iter().position(|s| s.name == name) else {
            return false;
        };
        self.students.remove(pos);
        self.workouts.remove(name);
        tracing::debug!(student = name, "removed student and their workouts");
        true
    }

    /// Append a workout entry to the (student, weekday) slot.
    pub fn add_entry(
        &mut self,
        student: &str,
        day: Weekday,
        entry: WorkoutEntry,
    ) -> Result<(), ScheduleError> {
        if !self.contains(student) {
            return Err(ScheduleError::UnknownStudent(student.to_string()));
        }
        tracing::debug!(student, day = %day, rule = %entry.rule, "registering workout entry");
        self.workouts
            .entry(student.to_string())
            .or_default()
            .entry(day)
            .or_default()
            .push(entry);
        Ok(())
    }

    /// The roster, in registration order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Look up a student by name.
    pub fn student(&self, name: &str) -> Result<&Student, ScheduleError> {
        self.students
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ScheduleError::UnknownStudent(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.students.iter().any(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Entries registered for a (student, weekday) slot, oldest first.
    /// Empty for unknown names or empty slots.
    pub fn entries(&self, student: &str, day: Weekday) -> &[WorkoutEntry] {
        self.workouts
            .get(student)
            .and_then(|days| days.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All (weekday, entries) slots registered for a student, Monday-first.
    pub fn weekday_entries<'a>(
        &'a self,
        student: &str,
    ) -> impl Iterator<Item = (Weekday, &'a [WorkoutEntry])> + 'a {
        self.workouts
            .get(student)
            .into_iter()
            .flat_map(|days| days.iter().map(|(day, entries)| (*day, entries.as_slice())))
    }

    /// Names that own workout entries, including names no longer in the
    /// roster.
    pub fn entry_owners<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.workouts.keys().map(String::as_str)
    }
}
