// JSON snapshot persistence. File names and shapes match the original
// agenda data files, so data written by earlier versions loads unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::models::{parse_date, RepeatRule, Student, Weekday, WorkoutEntry};
use crate::store::ScheduleStore;

const STUDENTS_FILE: &str = "alunos_dias_fixos.json";
const WORKOUTS_FILE: &str = "treinos_alunos.json";

/// Environment override for the data directory; tests point it at a
/// temporary location.
pub const DATA_DIR_ENV: &str = "TRAINER_AGENDA_DATA_DIR";

/// Snapshot layer: persists a [`ScheduleStore`] as two JSON files in the
/// data directory.
pub struct Snapshot {
    data_dir: PathBuf,
}

impl Snapshot {
    /// Resolve the data directory ([`DATA_DIR_ENV`] first, then the
    /// configured path).
    pub fn data_dir(config: &Config) -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        config.storage.data_dir.clone()
    }

    /// Snapshot rooted at the resolved data directory.
    pub fn open(config: &Config) -> Self {
        Self {
            data_dir: Self::data_dir(config),
        }
    }

    /// Snapshot rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    pub fn students_file(&self) -> PathBuf {
        self.data_dir.join(STUDENTS_FILE)
    }

    pub fn workouts_file(&self) -> PathBuf {
        self.data_dir.join(WORKOUTS_FILE)
    }

    /// Load the store from disk. Missing files yield an empty store.
    pub fn load(&self) -> Result<ScheduleStore> {
        let students = self.load_students()?;
        let workouts = self.load_workouts()?;
        tracing::debug!(
            students = students.len(),
            owners = workouts.len(),
            "loaded schedule snapshot"
        );
        Ok(ScheduleStore::from_parts(students, workouts))
    }

    /// Write both files, creating the data directory if needed.
    pub fn save(&self, store: &ScheduleStore) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory {}",
                self.data_dir.display()
            )
        })?;
        self.save_students(store)?;
        self.save_workouts(store)?;
        tracing::debug!(dir = %self.data_dir.display(), "saved schedule snapshot");
        Ok(())
    }

    fn load_students(&self) -> Result<Vec<Student>> {
        let path = self.students_file();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no student registry file, starting empty");
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        // Object key order is registration order; serde_json keeps it.
        let raw: Map<String, Value> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut students = Vec::with_capacity(raw.len());
        for (name, days) in raw {
            let days: Vec<String> = serde_json::from_value(days)
                .with_context(|| format!("Invalid weekday list for student {name}"))?;
            let days = days
                .iter()
                .map(|day| day.parse::<Weekday>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid weekday for student {name}"))?;
            students.push(Student::new(name, days));
        }
        Ok(students)
    }

    fn load_workouts(&self) -> Result<BTreeMap<String, BTreeMap<Weekday, Vec<WorkoutEntry>>>> {
        let path = self.workouts_file();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw: Map<String, Value> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut workouts = BTreeMap::new();
        for (name, days) in raw {
            let days: Map<String, Value> = serde_json::from_value(days)
                .with_context(|| format!("Invalid workout map for student {name}"))?;
            let mut by_day: BTreeMap<Weekday, Vec<WorkoutEntry>> = BTreeMap::new();
            for (day, entries) in days {
                let weekday = day
                    .parse::<Weekday>()
                    .with_context(|| format!("Invalid weekday key for student {name}"))?;
                let entries: Vec<RawEntry> = serde_json::from_value(entries).with_context(|| {
                    format!("Invalid workout entries for student {name} on {day}")
                })?;
                let entries = entries
                    .into_iter()
                    .map(RawEntry::into_entry)
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Invalid workout entry for student {name}"))?;
                // alias spellings of the same weekday merge into one slot
                by_day.entry(weekday).or_default().extend(entries);
            }
            workouts.insert(name, by_day);
        }
        Ok(workouts)
    }

    fn save_students(&self, store: &ScheduleStore) -> Result<()> {
        let mut registry = Map::new();
        for student in store.students() {
            let days = serde_json::to_value(&student.fixed_days)
                .context("Failed to serialize weekday list")?;
            registry.insert(student.name.clone(), days);
        }

        let path = self.students_file();
        let contents = serde_json::to_string_pretty(&registry)
            .context("Failed to serialize student registry")?;
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn save_workouts(&self, store: &ScheduleStore) -> Result<()> {
        let mut registry = Map::new();
        // roster order first, then entry owners no longer registered
        for student in store.students() {
            if let Some(by_day) = day_map(store, &student.name)? {
                registry.insert(student.name.clone(), Value::Object(by_day));
            }
        }
        for owner in store.entry_owners() {
            if registry.contains_key(owner) {
                continue;
            }
            if let Some(by_day) = day_map(store, owner)? {
                registry.insert(owner.to_string(), Value::Object(by_day));
            }
        }

        let path = self.workouts_file();
        let contents = serde_json::to_string_pretty(&registry)
            .context("Failed to serialize workout registry")?;
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Wire shape of one workout record.
#[derive(Debug, Deserialize)]
struct RawEntry {
    treino: String,
    repeticao: String,
    inicio: String,
}

impl RawEntry {
    fn into_entry(self) -> Result<WorkoutEntry> {
        let rule: RepeatRule = self
            .repeticao
            .parse()
            .with_context(|| format!("Invalid repeat rule {}", self.repeticao))?;
        let start_date = parse_date(&self.inicio)?;
        Ok(WorkoutEntry::new(self.treino, rule, start_date))
    }
}

fn day_map(store: &ScheduleStore, name: &str) -> Result<Option<Map<String, Value>>> {
    let mut by_day = Map::new();
    for (day, entries) in store.weekday_entries(name) {
        let value =
            serde_json::to_value(entries).context("Failed to serialize workout entries")?;
        by_day.insert(day.name().to_string(), value);
    }
    Ok(if by_day.is_empty() { None } else { Some(by_day) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_from_missing_files_is_empty() {
        let dir = tempdir().unwrap();
        let store = Snapshot::at(dir.path()).load().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.entry_owners().count(), 0);
    }

    #[test]
    fn test_round_trip_preserves_roster_order_and_entries() {
        let dir = tempdir().unwrap();
        let snapshot = Snapshot::at(dir.path());

        let mut store = ScheduleStore::new();
        store.add_student("Bruno", vec![Weekday::Tuesday, Weekday::Thursday]);
        store.add_student("Ana", vec![Weekday::Monday]);
        store
            .add_entry(
                "Ana",
                Weekday::Monday,
                WorkoutEntry::new(
                    "Agachamento 4x10".to_string(),
                    RepeatRule::Weekly,
                    date(2024, 3, 4),
                ),
            )
            .unwrap();
        snapshot.save(&store).unwrap();

        let loaded = snapshot.load().unwrap();
        let names: Vec<_> = loaded.students().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Ana"]);
        assert_eq!(
            loaded.entries("Ana", Weekday::Monday),
            store.entries("Ana", Weekday::Monday)
        );
    }

    #[test]
    fn test_loads_original_file_shape() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(STUDENTS_FILE),
            r#"{"Mariana": ["Segunda", "Quarta"], "João": ["Sábado"]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(WORKOUTS_FILE),
            r#"{
                "Mariana": {
                    "Segunda": [
                        {"treino": "Remada curvada 3x12", "repeticao": "Semanal", "inicio": "2024-02-05"},
                        {"treino": "Avaliação física", "repeticao": "Nunca", "inicio": "2024-02-12"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let store = Snapshot::at(dir.path()).load().unwrap();
        assert!(store.contains("João"));
        let entries = store.entries("Mariana", Weekday::Monday);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Remada curvada 3x12");
        assert_eq!(entries[0].rule, RepeatRule::Weekly);
        assert_eq!(entries[1].start_date, date(2024, 2, 12));
    }

    #[test]
    fn test_workouts_for_unregistered_names_survive_round_trips() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STUDENTS_FILE), r#"{"Ana": ["Segunda"]}"#).unwrap();
        fs::write(
            dir.path().join(WORKOUTS_FILE),
            r#"{"Carlos": {"Sexta": [{"treino": "Bike 40min", "repeticao": "Semanal", "inicio": "2024-01-05"}]}}"#,
        )
        .unwrap();

        let snapshot = Snapshot::at(dir.path());
        let store = snapshot.load().unwrap();
        assert!(!store.contains("Carlos"));
        assert_eq!(store.entries("Carlos", Weekday::Friday).len(), 1);

        snapshot.save(&store).unwrap();
        let reloaded = snapshot.load().unwrap();
        assert_eq!(reloaded.entries("Carlos", Weekday::Friday).len(), 1);
    }

    #[test]
    fn test_students_without_entries_are_left_out_of_the_workout_file() {
        let dir = tempdir().unwrap();
        let snapshot = Snapshot::at(dir.path());

        let mut store = ScheduleStore::new();
        store.add_student("Ana", vec![Weekday::Monday]);
        snapshot.save(&store).unwrap();

        let raw: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(snapshot.workouts_file()).unwrap()).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_invalid_weekday_key_surfaces_typed_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STUDENTS_FILE), r#"{"Ana": ["Feriado"]}"#).unwrap();

        let err = Snapshot::at(dir.path()).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScheduleError>(),
            Some(ScheduleError::InvalidWeekday(_))
        ));
    }

    #[test]
    fn test_malformed_start_date_surfaces_typed_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STUDENTS_FILE), r#"{"Ana": ["Segunda"]}"#).unwrap();
        fs::write(
            dir.path().join(WORKOUTS_FILE),
            r#"{"Ana": {"Segunda": [{"treino": "X", "repeticao": "Semanal", "inicio": "04/03/2024"}]}}"#,
        )
        .unwrap();

        let err = Snapshot::at(dir.path()).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScheduleError>(),
            Some(ScheduleError::MalformedDate(_))
        ));
    }
}
