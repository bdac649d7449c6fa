use crate::model::{DayEntry, Duty, Period, ShiftId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Résultat d'une résolution pour un instant donné.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub at: NaiveDateTime,
    pub period: Period,
    /// Jour qui « possède » la tranche (veille pour la fin de nuit).
    pub attributed_date: NaiveDate,
    /// Jours écoulés depuis la date de base (négatif avant).
    pub offset: i64,
    pub index: usize,
    /// Équipe de quart, `None` si personne ne tient la tranche.
    pub shift: Option<ShiftId>,
    pub entry: DayEntry,
}

/// Statut de chaque équipe du roster pour une journée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub cycle: String,
    pub date: NaiveDate,
    pub index: usize,
    pub entry: DayEntry,
    pub duties: BTreeMap<ShiftId, Duty>,
}

impl DaySchedule {
    /// Statut d'une équipe ; une équipe inconnue est au repos.
    pub fn duty(&self, shift: ShiftId) -> Duty {
        self.duties.get(&shift).copied().unwrap_or(Duty::Resting)
    }

    pub fn on_duty(&self) -> impl Iterator<Item = (ShiftId, Period)> + '_ {
        self.duties.iter().filter_map(|(s, d)| match d {
            Duty::On(p) => Some((*s, *p)),
            Duty::Resting => None,
        })
    }

    pub fn resting(&self) -> impl Iterator<Item = ShiftId> + '_ {
        self.duties
            .iter()
            .filter(|(_, d)| d.is_resting())
            .map(|(s, _)| *s)
    }
}
