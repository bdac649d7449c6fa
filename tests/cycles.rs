#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{
    calendar, io, load_cycle_from_file, parse_crews, Catalog, CycleConfig, CycleError,
    CycleStore, CycleWarning, DayEntry, RotationPlan, ShiftId, MAX_CYCLE_LENGTH,
};
use tempfile::tempdir;

fn id(c: char) -> ShiftId {
    ShiftId::new(c).unwrap()
}

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn two_days() -> Vec<DayEntry> {
    vec![
        DayEntry::new(Some(id('A')), Some(id('B')), None),
        DayEntry::new(Some(id('B')), None, Some(id('A'))),
    ]
}

fn plan(name: &str, base: (i32, u32, u32), length: usize, pattern: &str, crews: &str) -> RotationPlan {
    RotationPlan {
        name: name.into(),
        description: None,
        base_date: NaiveDate::from_ymd_opt(base.0, base.1, base.2).unwrap(),
        length,
        pattern: pattern.into(),
        crews: parse_crews(crews).unwrap(),
    }
}

#[test]
fn rejects_empty_table() {
    let err = CycleConfig::new("x", base(), vec![id('A')], vec![]).unwrap_err();
    assert_eq!(err, CycleError::EmptyTable("x".into()));
}

#[test]
fn rejects_unknown_shift() {
    let err = CycleConfig::new("x", base(), vec![id('A')], two_days()).unwrap_err();
    assert!(matches!(err, CycleError::UnknownShift { day: 0, .. }));
}

#[test]
fn rejects_duplicate_roster_letter() {
    let err =
        CycleConfig::new("x", base(), vec![id('A'), id('B'), id('A')], two_days()).unwrap_err();
    assert!(matches!(err, CycleError::DuplicateRosterShift { .. }));
}

#[test]
fn rejects_declared_length_mismatch() {
    let json = r#"{"name":"x","base_date":"2026-01-01","length":3,"shifts":["A"],"days":[{"morning":"A"}]}"#;
    let err = serde_json::from_str::<CycleConfig>(json).unwrap_err();
    assert!(err.to_string().contains("declared length 3"));
}

#[test]
fn rejects_names_unfit_for_file_names() {
    for name in ["../../x", "a/b", "a.b", "with space"] {
        let err = CycleConfig::new(name, base(), vec![id('A'), id('B')], two_days()).unwrap_err();
        assert_eq!(err, CycleError::InvalidName(name.into()));
    }
    assert!(CycleConfig::new("night_4-crews", base(), vec![id('A'), id('B')], two_days()).is_ok());
}

#[test]
fn rejects_oversized_table() {
    let days = vec![DayEntry::new(Some(id('A')), None, None); MAX_CYCLE_LENGTH + 1];
    let err = CycleConfig::new("big", base(), vec![id('A')], days).unwrap_err();
    assert!(matches!(err, CycleError::TooLong { .. }));
}

#[test]
fn index_wraps_in_both_directions() {
    let c = CycleConfig::new("x", base(), vec![id('A'), id('B')], two_days()).unwrap();
    assert_eq!(c.index_of(0), 0);
    assert_eq!(c.index_of(3), 1);
    assert_eq!(c.index_of(-1), 1);
    assert_eq!(c.index_of(-2), 0);
    assert_eq!(c.day_entry(-3), c.days()[1]);
}

#[test]
fn lint_reports_tolerated_anomalies() {
    let days = vec![DayEntry::new(Some(id('A')), None, Some(id('A')))];
    let c = CycleConfig::new("x", base(), vec![id('A'), id('B')], days).unwrap();
    let warnings = c.lint();
    assert!(warnings.contains(&CycleWarning::ShiftTwiceInDay { day: 0, shift: id('A') }));
    assert!(warnings.contains(&CycleWarning::NeverScheduled(id('B'))));
}

#[test]
fn builtins_load_with_expected_lengths() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.names(), vec!["84", "42", "14", "8"]);
    for (name, len) in [("84", 84), ("42", 42), ("14", 14), ("8", 8)] {
        assert_eq!(catalog.require(name).unwrap().len(), len);
    }
}

#[test]
fn builtins_are_lint_free() {
    for cycle in Catalog::builtin().unwrap().iter() {
        assert!(cycle.lint().is_empty(), "cycle {} has warnings", cycle.name());
    }
}

#[test]
fn unknown_cycle_lists_available_ones() {
    let err = Catalog::builtin().unwrap().require("99").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown cycle '99'. Available cycles: 84, 42, 14, 8"
    );
}

#[test]
fn insert_replaces_same_name() {
    let mut catalog = Catalog::builtin().unwrap();
    let a = id('A');
    let custom = CycleConfig::new(
        "14",
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        vec![a],
        vec![DayEntry::new(Some(a), None, None)],
    )
    .unwrap();
    catalog.insert(custom);
    assert_eq!(catalog.names().len(), 4);
    assert_eq!(catalog.require("14").unwrap().len(), 1);
}

#[test]
fn builtin_tables_match_their_rotation_plans() {
    let catalog = Catalog::builtin().unwrap();
    let plans = [
        plan("84", (2026, 1, 1), 84, "MMMAAANNN---", "A:0,B:3,C:6,D:9"),
        plan("42", (2025, 12, 29), 42, "MMAA--", "A:0,B:2,C:4"),
        plan("14", (2026, 1, 5), 14, "MMMMM--AAAAA--", "A:0,B:7"),
        plan("8", (2026, 1, 1), 8, "MMAANN--", "A:0,B:2,C:4,D:6"),
    ];
    for p in plans {
        let expanded = p.expand().unwrap();
        let builtin = catalog.require(&p.name).unwrap();
        assert_eq!(expanded.base_date(), builtin.base_date());
        assert_eq!(expanded.shifts(), builtin.shifts());
        assert_eq!(expanded.days(), builtin.days(), "table of cycle {}", p.name);
    }
}

#[test]
fn store_save_load_and_list() {
    let dir = tempdir().unwrap();
    let store = CycleStore::new(dir.path().join("cycles"));
    assert!(store.list().unwrap().is_empty());

    let cycle = plan("huit", (2026, 1, 1), 8, "MMAANN--", "A:0,B:2,C:4,D:6")
        .expand()
        .unwrap();
    let path = store.save(&cycle).unwrap();
    assert!(path.ends_with("cycle-huit.json"));

    let loaded = store.load("huit").unwrap();
    assert_eq!(loaded, cycle);

    std::fs::write(dir.path().join("cycles").join("broken.json"), "{not json").unwrap();
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), "huit");

    let catalog = Catalog::builtin().unwrap().with_store(&store).unwrap();
    assert_eq!(catalog.names(), vec!["84", "42", "14", "8", "huit"]);
}

#[test]
fn store_refuses_names_leaving_its_directory() {
    let dir = tempdir().unwrap();
    let cycles = dir.path().join("cycles");
    let store = CycleStore::new(&cycles);

    let err = store.load("../../escaped").unwrap_err();
    assert!(err.to_string().contains("invalid cycle name"));
    assert!(!dir.path().join("escaped.json").exists());
}

#[test]
fn inconsistent_cycle_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"name":"bad","base_date":"2026-01-01","length":0,"shifts":["A"],"days":[]}"#,
    )
    .unwrap();
    let err = load_cycle_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("empty table"));
}

#[test]
fn cycle_file_with_unsafe_name_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("evil.json");
    std::fs::write(
        &path,
        r#"{"name":"../x","base_date":"2026-01-01","length":1,"shifts":["A"],"days":[{"morning":"A"}]}"#,
    )
    .unwrap();
    let err = load_cycle_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid cycle name"));
}

#[test]
fn calendar_csv_export() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("cal.csv");
    let catalog = Catalog::builtin().unwrap();
    let cycle = catalog.require("84").unwrap();
    let from = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let days = calendar(cycle, from, to).unwrap();
    io::export_calendar_csv(&out, cycle, &days).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,index,morning,afternoon,night,A,B,C,D");
    assert_eq!(lines[1], "2025-12-31,83,B,C,D,resting,07–15,15–23,23–07");
    assert_eq!(lines[2], "2026-01-01,0,A,B,C,07–15,15–23,23–07,resting");
    assert_eq!(lines.len(), 3);
}
