use serde::{Deserialize, Serialize};

use super::Weekday;

/// A registered student and the weekdays they train on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique name; the roster's primary key.
    pub name: String,
    /// Fixed training weekdays. Sessions only ever resolve on these,
    /// whatever entries are registered elsewhere.
    pub fixed_days: Vec<Weekday>,
}

impl Student {
    /// Create a student, normalizing the weekday set to Monday-first
    /// order with duplicates removed.
    pub fn new(name: String, mut fixed_days: Vec<Weekday>) -> Self {
        fixed_days.sort();
        fixed_days.dedup();
        Self { name, fixed_days }
    }

    /// Whether `day` is one of the student's fixed training days.
    pub fn trains_on(&self, day: Weekday) -> bool {
        self.fixed_days.contains(&day)
    }
}
