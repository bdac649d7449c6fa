use super::{day_schedule, DaySchedule};
use crate::cycle::CycleConfig;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Tableaux journaliers de `from` à `to` inclus.
pub fn calendar(cycle: &CycleConfig, from: NaiveDate, to: NaiveDate) -> Result<Vec<DaySchedule>> {
    if to < from {
        bail!("end date must be after start date");
    }

    let mut out = Vec::new();
    let mut current = from;
    loop {
        out.push(day_schedule(current, cycle));
        if current == to {
            break;
        }
        current = current.succ_opt().context("date overflow")?;
    }
    Ok(out)
}
