use crate::model::Period;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Jour de rattachement : la fin de nuit (00:00–07:00) appartient à la veille,
/// jour où la tranche a commencé.
pub(super) fn attributed_date(at: NaiveDateTime, period: Period) -> NaiveDate {
    let date = at.date();
    if period == Period::Night && at.hour() < 7 {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Jours entiers entre `base` et `date` (négatif si `date` précède `base`).
pub(super) fn days_between(base: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(base).num_days()
}
