// End-to-end scenarios: roster + workout registration resolved through the
// recurrence engine, with snapshot persistence in between.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use trainer_agenda::storage::Snapshot;
use trainer_agenda::{
    resolve_day, resolve_range, RepeatRule, ScheduleError, ScheduleStore, Weekday, WorkoutEntry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(content: &str, rule: RepeatRule, start: NaiveDate) -> WorkoutEntry {
    WorkoutEntry::new(content.to_string(), rule, start)
}

/// Roster of a typical week: three students, every repeat rule in play.
fn spring_roster() -> ScheduleStore {
    let mut store = ScheduleStore::new();
    store.add_student(
        "Mariana",
        vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
    );
    store.add_student("Pedro", vec![Weekday::Tuesday, Weekday::Thursday]);
    store.add_student("Lia", vec![Weekday::Saturday]);

    store
        .add_entry(
            "Mariana",
            Weekday::Monday,
            entry("Inferiores completo", RepeatRule::Weekly, date(2024, 3, 4)),
        )
        .unwrap();
    store
        .add_entry(
            "Mariana",
            Weekday::Wednesday,
            entry("Superiores", RepeatRule::Biweekly, date(2024, 3, 6)),
        )
        .unwrap();
    store
        .add_entry(
            "Mariana",
            Weekday::Friday,
            entry("HIIT 20min", RepeatRule::Never, date(2024, 3, 8)),
        )
        .unwrap();
    store
        .add_entry(
            "Mariana",
            Weekday::Friday,
            entry("Core express", RepeatRule::Weekly, date(2024, 3, 8)),
        )
        .unwrap();
    store
        .add_entry(
            "Pedro",
            Weekday::Tuesday,
            entry("Força geral", RepeatRule::Weekly, date(2024, 2, 6)),
        )
        .unwrap();
    store
        .add_entry(
            "Pedro",
            Weekday::Thursday,
            entry("Mobilidade", RepeatRule::Monthly, date(2024, 1, 7)),
        )
        .unwrap();
    store
        .add_entry(
            "Lia",
            Weekday::Saturday,
            entry("Corrida leve", RepeatRule::Weekly, date(2024, 3, 9)),
        )
        .unwrap();
    store
}

fn summarize(
    store: &ScheduleStore,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<(NaiveDate, String, String)> {
    resolve_range(store, from, to)
        .into_iter()
        .map(|o| (o.date, o.student.to_string(), o.entry.content.to_string()))
        .collect()
}

#[test]
fn test_first_week_resolves_every_rule() {
    let store = spring_roster();

    // 2024-03-04 is a Monday; the range covers Monday through Sunday
    let summary = summarize(&store, date(2024, 3, 4), date(2024, 3, 10));
    assert_eq!(
        summary,
        vec![
            (date(2024, 3, 4), "Mariana".into(), "Inferiores completo".into()),
            (date(2024, 3, 5), "Pedro".into(), "Força geral".into()),
            (date(2024, 3, 6), "Mariana".into(), "Superiores".into()),
            (date(2024, 3, 7), "Pedro".into(), "Mobilidade".into()),
            (date(2024, 3, 8), "Mariana".into(), "HIIT 20min".into()),
            (date(2024, 3, 8), "Mariana".into(), "Core express".into()),
            (date(2024, 3, 9), "Lia".into(), "Corrida leve".into()),
        ]
    );
}

#[test]
fn test_second_week_drops_expired_rules() {
    let store = spring_roster();

    // one-off HIIT is gone, the biweekly skips its off week, the monthly
    // entry waits for the next 7th
    let summary = summarize(&store, date(2024, 3, 11), date(2024, 3, 17));
    assert_eq!(
        summary,
        vec![
            (date(2024, 3, 11), "Mariana".into(), "Inferiores completo".into()),
            (date(2024, 3, 12), "Pedro".into(), "Força geral".into()),
            (date(2024, 3, 15), "Mariana".into(), "Core express".into()),
            (date(2024, 3, 16), "Lia".into(), "Corrida leve".into()),
        ]
    );
}

#[test]
fn test_resolve_day_collects_all_matches_on_a_shared_day() {
    let store = spring_roster();

    let matches = resolve_day(&store, "Mariana", date(2024, 3, 8)).unwrap();
    let contents: Vec<_> = matches.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["HIIT 20min", "Core express"]);
}

#[test]
fn test_monthly_on_the_31st_only_lands_on_real_31sts() {
    let mut store = ScheduleStore::new();
    store.add_student("Ana", vec![Weekday::Wednesday]);
    store
        .add_entry(
            "Ana",
            Weekday::Wednesday,
            entry("Avaliação mensal", RepeatRule::Monthly, date(2024, 1, 31)),
        )
        .unwrap();

    // Only January and July of 2024 have a Wednesday the 31st; February has
    // no 31st at all and is skipped without any end-of-month rollover
    let dates: Vec<_> = resolve_range(&store, date(2024, 1, 1), date(2024, 12, 31))
        .into_iter()
        .map(|o| o.date)
        .collect();
    assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 7, 31)]);
}

#[test]
fn test_removing_a_student_cascades_to_their_entries() {
    let mut store = spring_roster();

    assert!(store.remove_student("Mariana"));
    let err = resolve_day(&store, "Mariana", date(2024, 3, 4)).unwrap_err();
    assert_eq!(err, ScheduleError::UnknownStudent("Mariana".to_string()));

    // re-registering the name starts from a clean slate
    store.add_student("Mariana", vec![Weekday::Monday]);
    assert!(resolve_day(&store, "Mariana", date(2024, 3, 4))
        .unwrap()
        .is_empty());
}

#[test]
fn test_resolution_is_stable_across_snapshot_round_trips() {
    let dir = tempdir().unwrap();
    let snapshot = Snapshot::at(dir.path());

    let store = spring_roster();
    let before = summarize(&store, date(2024, 3, 4), date(2024, 3, 17));

    snapshot.save(&store).unwrap();
    let reloaded = snapshot.load().unwrap();
    let after = summarize(&reloaded, date(2024, 3, 4), date(2024, 3, 17));

    assert_eq!(before, after);
}

#[test]
fn test_event_feed_shape() {
    let store = spring_roster();

    let events: Vec<_> = resolve_range(&store, date(2024, 3, 8), date(2024, 3, 9))
        .iter()
        .map(|o| o.to_event())
        .collect();
    assert_eq!(
        serde_json::to_value(&events).unwrap(),
        serde_json::json!([
            {
                "title": "Mariana",
                "start": "2024-03-08",
                "end": "2024-03-08",
                "extendedProps": {"treino": "HIIT 20min"},
            },
            {
                "title": "Mariana",
                "start": "2024-03-08",
                "end": "2024-03-08",
                "extendedProps": {"treino": "Core express"},
            },
            {
                "title": "Lia",
                "start": "2024-03-09",
                "end": "2024-03-09",
                "extendedProps": {"treino": "Corrida leve"},
            },
        ])
    );
}
