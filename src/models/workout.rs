use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RepeatRule;

/// A registered workout for one (student, weekday) slot.
///
/// Entries are append-only: registering again for the same slot adds a new
/// entry rather than replacing earlier ones, so several entries may recur
/// onto the same calendar day. Field names on the wire match the original
/// agenda files (`treino`, `repeticao`, `inicio`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Free-text workout content.
    #[serde(rename = "treino")]
    pub content: String,
    /// Repetition rule applied from `start_date`.
    #[serde(rename = "repeticao")]
    pub rule: RepeatRule,
    /// Date the entry was registered; recurrence anchors here.
    #[serde(rename = "inicio")]
    pub start_date: NaiveDate,
}

impl WorkoutEntry {
    /// Create a new entry anchored at `start_date`.
    pub fn new(content: String, rule: RepeatRule, start_date: NaiveDate) -> Self {
        Self {
            content,
            rule,
            start_date,
        }
    }

    /// Whether this entry occurs on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.rule.matches(self.start_date, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_occurs_on_delegates_to_rule() {
        let entry = WorkoutEntry::new(
            "Treino A".to_string(),
            RepeatRule::Weekly,
            date(2024, 3, 4),
        );
        assert!(entry.occurs_on(date(2024, 3, 11)));
        assert!(!entry.occurs_on(date(2024, 3, 12)));
    }

    #[test]
    fn test_wire_field_names() {
        let entry = WorkoutEntry::new(
            "Costas e bíceps".to_string(),
            RepeatRule::Never,
            date(2024, 5, 2),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "treino": "Costas e bíceps",
                "repeticao": "Nunca",
                "inicio": "2024-05-02",
            })
        );
        let back: WorkoutEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
