use crate::cycle::CycleConfig;
use crate::model::Period;
use crate::resolver::DaySchedule;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::WriterBuilder;
use std::path::Path;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date calendaire `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw} (expected YYYY-MM-DD)"))
}

/// Instant en heure murale.
///
/// Accepte `YYYY-MM-DDTHH:MM[:SS]`, une date RFC3339 (lue dans son propre décalage)
/// ou une date seule, placée à midi pour éviter toute ambiguïté de fin de nuit.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    let date = parse_date(raw).with_context(|| format!("invalid date/datetime: {raw}"))?;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).context("invalid noon conversion")?;
    Ok(date.and_time(noon))
}

/// Export CSV d'un calendrier : header `date,index,morning,afternoon,night,<équipes...>`
pub fn export_calendar_csv<P: AsRef<Path>>(
    path: P,
    cycle: &CycleConfig,
    days: &[DaySchedule],
) -> Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["date".to_string(), "index".to_string()];
    header.extend(Period::ALL.iter().map(|p| p.name().to_string()));
    header.extend(cycle.shifts().iter().map(ToString::to_string));
    w.write_record(&header)?;

    for day in days {
        let mut record = vec![day.date.to_string(), day.index.to_string()];
        record.extend(
            Period::ALL
                .iter()
                .map(|p| day.entry.get(*p).map(|s| s.to_string()).unwrap_or_default()),
        );
        record.extend(
            cycle
                .shifts()
                .iter()
                .map(|s| day.duty(*s).label().to_string()),
        );
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}
