#![forbid(unsafe_code)]
use chrono::NaiveTime;
use roulement::{DayEntry, Duty, Period, ShiftId};

fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn classify_boundaries() {
    assert_eq!(Period::classify(t(6, 59, 59)), Period::Night);
    assert_eq!(Period::classify(t(7, 0, 0)), Period::Morning);
    assert_eq!(Period::classify(t(14, 59, 59)), Period::Morning);
    assert_eq!(Period::classify(t(15, 0, 0)), Period::Afternoon);
    assert_eq!(Period::classify(t(22, 59, 59)), Period::Afternoon);
    assert_eq!(Period::classify(t(23, 0, 0)), Period::Night);
    assert_eq!(Period::classify(t(0, 0, 0)), Period::Night);
}

#[test]
fn representative_times_classify_back() {
    for p in Period::ALL {
        assert_eq!(Period::classify(p.representative_time()), p);
    }
}

#[test]
fn shift_id_parsing() {
    assert_eq!("B".parse::<ShiftId>().unwrap().letter(), 'B');
    assert!("b".parse::<ShiftId>().is_err());
    assert!("AB".parse::<ShiftId>().is_err());
    assert!("".parse::<ShiftId>().is_err());
}

#[test]
fn day_entry_json_omits_empty_periods() {
    let a = ShiftId::new('A').unwrap();
    let entry = DayEntry::new(Some(a), None, None);
    let json = serde_json::to_string(&entry).unwrap();
    assert_eq!(json, r#"{"morning":"A"}"#);
    let back: DayEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn duplicated_shifts_detected() {
    let a = ShiftId::new('A').unwrap();
    let b = ShiftId::new('B').unwrap();
    let entry = DayEntry::new(Some(a), Some(b), Some(a));
    assert_eq!(entry.duplicated_shifts(), vec![a]);
    assert!(DayEntry::default().duplicated_shifts().is_empty());
}

#[test]
fn duty_labels() {
    assert_eq!(Duty::Resting.label(), "resting");
    assert_eq!(Duty::On(Period::Night).to_string(), "23–07");
    assert!(Duty::Resting.is_resting());
}
