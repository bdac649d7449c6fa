use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiant fort pour une équipe (une lettre majuscule ASCII).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftId(char);

impl ShiftId {
    pub fn new(letter: char) -> Result<Self, String> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter))
        } else {
            Err(format!("invalid shift letter: {letter:?} (expected A-Z)"))
        }
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl TryFrom<String> for ShiftId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ShiftId> for String {
    fn from(id: ShiftId) -> Self {
        id.0.to_string()
    }
}

impl std::str::FromStr for ShiftId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(format!("invalid shift id: {s:?} (expected a single letter)")),
        }
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tranche horaire de 8 h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// [07:00, 15:00)
    Morning,
    /// [15:00, 23:00)
    Afternoon,
    /// [23:00, 07:00) du lendemain
    Night,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Night];

    /// Classe une heure murale dans sa tranche. Fonction totale.
    pub fn classify(time: NaiveTime) -> Self {
        match time.hour() {
            7..=14 => Period::Morning,
            15..=22 => Period::Afternoon,
            _ => Period::Night,
        }
    }

    /// Libellé d'affichage ("07–15", ...).
    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "07–15",
            Period::Afternoon => "15–23",
            Period::Night => "23–07",
        }
    }

    /// Heure représentative rattachée au jour même (utilisée pour le tableau d'une journée).
    pub fn representative_time(self) -> NaiveTime {
        let hour = match self {
            Period::Morning => 8,
            Period::Afternoon => 16,
            Period::Night => 23,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn name(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Night => "night",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Une position du cycle : quelle équipe tient chaque tranche (ou personne).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<ShiftId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<ShiftId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night: Option<ShiftId>,
}

impl DayEntry {
    pub fn new(
        morning: Option<ShiftId>,
        afternoon: Option<ShiftId>,
        night: Option<ShiftId>,
    ) -> Self {
        Self {
            morning,
            afternoon,
            night,
        }
    }

    pub fn get(&self, period: Period) -> Option<ShiftId> {
        match period {
            Period::Morning => self.morning,
            Period::Afternoon => self.afternoon,
            Period::Night => self.night,
        }
    }

    pub fn set(&mut self, period: Period, shift: Option<ShiftId>) {
        match period {
            Period::Morning => self.morning = shift,
            Period::Afternoon => self.afternoon = shift,
            Period::Night => self.night = shift,
        }
    }

    /// Tranches (dans l'ordre du jour) et l'équipe qui les tient.
    pub fn assignments(&self) -> impl Iterator<Item = (Period, ShiftId)> + '_ {
        Period::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|s| (p, s)))
    }

    /// Équipes présentes sur plus d'une tranche de la même journée.
    pub fn duplicated_shifts(&self) -> Vec<ShiftId> {
        let mut seen = Vec::new();
        let mut dups = Vec::new();
        for (_, shift) in self.assignments() {
            if seen.contains(&shift) {
                if !dups.contains(&shift) {
                    dups.push(shift);
                }
            } else {
                seen.push(shift);
            }
        }
        dups
    }
}

/// Statut d'une équipe pour une journée donnée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "period")]
pub enum Duty {
    Resting,
    On(Period),
}

impl Duty {
    pub fn label(self) -> &'static str {
        match self {
            Duty::Resting => "resting",
            Duty::On(p) => p.label(),
        }
    }

    pub fn is_resting(self) -> bool {
        matches!(self, Duty::Resting)
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
