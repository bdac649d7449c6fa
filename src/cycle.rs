use crate::model::{DayEntry, ShiftId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longueur maximale d'un cycle (dix ans de positions).
pub const MAX_CYCLE_LENGTH: usize = 3660;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("cycle name cannot be empty")]
    EmptyName,
    #[error("invalid cycle name {0:?} (allowed: letters, digits, '-' and '_')")]
    InvalidName(String),
    #[error("cycle {name} is too long: {length} days (max {})", MAX_CYCLE_LENGTH)]
    TooLong { name: String, length: usize },
    #[error("cycle {0} has an empty table")]
    EmptyTable(String),
    #[error("cycle {name}: declared length {declared} but table has {actual} entries")]
    LengthMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },
    #[error("cycle {0} has an empty roster")]
    EmptyRoster(String),
    #[error("cycle {name}: shift {shift} listed twice in roster")]
    DuplicateRosterShift { name: String, shift: ShiftId },
    #[error("cycle {name}: day {day} references shift {shift} outside the roster")]
    UnknownShift {
        name: String,
        day: usize,
        shift: ShiftId,
    },
}

/// Le nom sert aussi de nom de fichier dans un `CycleStore`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Anomalie tolérée dans un cycle (les données source ne sont pas strictement validées).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleWarning {
    /// Une équipe tient plusieurs tranches sur la même position.
    ShiftTwiceInDay { day: usize, shift: ShiftId },
    /// Une équipe du roster n'apparaît jamais dans la table.
    NeverScheduled(ShiftId),
}

impl std::fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleWarning::ShiftTwiceInDay { day, shift } => {
                write!(f, "day {day}: shift {shift} works more than one period")
            }
            CycleWarning::NeverScheduled(shift) => {
                write!(f, "shift {shift} is never scheduled")
            }
        }
    }
}

/// Cycle de roulement : table immuable répétée à l'infini autour de `base_date`.
///
/// Une fois construit, un `CycleConfig` est toujours cohérent : table non vide,
/// longueur égale à la taille de la table, et chaque équipe citée appartient au roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CycleFile", into = "CycleFile")]
pub struct CycleConfig {
    name: String,
    description: Option<String>,
    base_date: NaiveDate,
    shifts: Vec<ShiftId>,
    days: Vec<DayEntry>,
}

/// Forme sérialisée d'un cycle (fichier JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_date: NaiveDate,
    pub length: usize,
    pub shifts: Vec<ShiftId>,
    pub days: Vec<DayEntry>,
}

impl CycleConfig {
    pub fn new<N: Into<String>>(
        name: N,
        base_date: NaiveDate,
        shifts: Vec<ShiftId>,
        days: Vec<DayEntry>,
    ) -> Result<Self, CycleError> {
        let name = name.into();
        let length = days.len();
        Self::build(name, None, base_date, length, shifts, days)
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    fn build(
        name: String,
        description: Option<String>,
        base_date: NaiveDate,
        length: usize,
        shifts: Vec<ShiftId>,
        days: Vec<DayEntry>,
    ) -> Result<Self, CycleError> {
        if name.trim().is_empty() {
            return Err(CycleError::EmptyName);
        }
        if !is_valid_name(&name) {
            return Err(CycleError::InvalidName(name));
        }
        if days.is_empty() {
            return Err(CycleError::EmptyTable(name));
        }
        if days.len() > MAX_CYCLE_LENGTH {
            return Err(CycleError::TooLong {
                name,
                length: days.len(),
            });
        }
        if length != days.len() {
            return Err(CycleError::LengthMismatch {
                name,
                declared: length,
                actual: days.len(),
            });
        }
        if shifts.is_empty() {
            return Err(CycleError::EmptyRoster(name));
        }
        for (i, shift) in shifts.iter().enumerate() {
            if shifts[..i].contains(shift) {
                return Err(CycleError::DuplicateRosterShift {
                    name,
                    shift: *shift,
                });
            }
        }
        for (day, entry) in days.iter().enumerate() {
            if let Some((_, shift)) = entry.assignments().find(|(_, s)| !shifts.contains(s)) {
                return Err(CycleError::UnknownShift { name, day, shift });
            }
        }
        Ok(Self {
            name,
            description,
            base_date,
            shifts,
            days,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    /// Équipes du roster, dans l'ordre déclaré.
    pub fn shifts(&self) -> &[ShiftId] {
        &self.shifts
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    /// Nombre de positions du cycle (toujours > 0).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Position dans la table pour un décalage quelconque (négatif compris).
    pub fn index_of(&self, offset: i64) -> usize {
        // len() tient dans un i64 et le reste euclidien est dans [0, len)
        offset.rem_euclid(self.len() as i64) as usize
    }

    pub fn day_entry(&self, offset: i64) -> DayEntry {
        self.days[self.index_of(offset)]
    }

    pub fn lint(&self) -> Vec<CycleWarning> {
        let mut out = Vec::new();
        for (day, entry) in self.days.iter().enumerate() {
            for shift in entry.duplicated_shifts() {
                out.push(CycleWarning::ShiftTwiceInDay { day, shift });
            }
        }
        for shift in &self.shifts {
            let scheduled = self
                .days
                .iter()
                .any(|e| e.assignments().any(|(_, s)| s == *shift));
            if !scheduled {
                out.push(CycleWarning::NeverScheduled(*shift));
            }
        }
        out
    }
}

impl TryFrom<CycleFile> for CycleConfig {
    type Error = CycleError;

    fn try_from(file: CycleFile) -> Result<Self, Self::Error> {
        Self::build(
            file.name,
            file.description,
            file.base_date,
            file.length,
            file.shifts,
            file.days,
        )
    }
}

impl From<CycleConfig> for CycleFile {
    fn from(cycle: CycleConfig) -> Self {
        Self {
            length: cycle.days.len(),
            name: cycle.name,
            description: cycle.description,
            base_date: cycle.base_date,
            shifts: cycle.shifts,
            days: cycle.days,
        }
    }
}
