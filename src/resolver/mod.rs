mod calendar;
mod day;
mod types;

pub use calendar::calendar;
pub use types::{DaySchedule, Resolution};

use crate::cycle::CycleConfig;
use crate::model::{Duty, Period};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Résout l'équipe de quart à un instant (heure murale locale).
///
/// Fonction pure et totale : tranche, jour de rattachement, position dans le cycle,
/// puis lecture de la tranche dans la position trouvée.
pub fn resolve(at: NaiveDateTime, cycle: &CycleConfig) -> Resolution {
    let period = Period::classify(at.time());
    let attributed_date = day::attributed_date(at, period);
    let offset = day::days_between(cycle.base_date(), attributed_date);
    let index = cycle.index_of(offset);
    let entry = cycle.days()[index];
    Resolution {
        at,
        period,
        attributed_date,
        offset,
        index,
        shift: entry.get(period),
        entry,
    }
}

/// Tableau des équipes pour une journée, indépendamment de l'heure courante.
///
/// Chaque équipe du roster part « au repos », puis les trois tranches du jour
/// (matin, après-midi, nuit) sont résolues à une heure représentative rattachée à `date`.
pub fn day_schedule(date: NaiveDate, cycle: &CycleConfig) -> DaySchedule {
    let mut duties: BTreeMap<_, _> = cycle.shifts().iter().map(|s| (*s, Duty::Resting)).collect();

    for period in Period::ALL {
        let r = resolve(date.and_time(period.representative_time()), cycle);
        if let Some(shift) = r.shift {
            if let Some(duty) = duties.get_mut(&shift) {
                *duty = Duty::On(period);
            }
        }
    }

    let index = cycle.index_of(day::days_between(cycle.base_date(), date));
    DaySchedule {
        cycle: cycle.name().to_string(),
        date,
        index,
        entry: cycle.days()[index],
        duties,
    }
}
