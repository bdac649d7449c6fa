use crate::cycle::{CycleConfig, MAX_CYCLE_LENGTH};
use crate::model::{DayEntry, Period, ShiftId};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plan de roulement : un motif commun à toutes les équipes, décalé par équipe.
///
/// Le motif est une suite de codes `M` (matin), `A` (après-midi), `N` (nuit)
/// et `-` (repos). Le jour `d` du cycle, l'équipe de décalage `o` suit le code
/// `pattern[(d + o) % pattern.len()]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationPlan {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_date: NaiveDate,
    pub length: usize,
    pub pattern: String,
    pub crews: Vec<Crew>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub shift: ShiftId,
    pub offset: usize,
}

impl RotationPlan {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("rotation name cannot be empty");
        }
        if self.length == 0 {
            bail!("rotation length must be > 0");
        }
        if self.length > MAX_CYCLE_LENGTH {
            bail!("rotation length must be <= {MAX_CYCLE_LENGTH}");
        }
        if self.pattern.is_empty() {
            bail!("rotation pattern cannot be empty");
        }
        for code in self.pattern.chars() {
            period_for_code(code)?;
        }
        if self.crews.is_empty() {
            bail!("rotation must define at least one crew");
        }
        Ok(())
    }

    /// Déroule le plan en table de cycle.
    pub fn expand(&self) -> Result<CycleConfig> {
        self.validate()?;
        let codes: Vec<char> = self.pattern.chars().collect();
        let n = codes.len();

        let mut days = Vec::with_capacity(self.length);
        for day in 0..self.length {
            let mut entry = DayEntry::default();
            for crew in &self.crews {
                // décalage réduit d'abord : aucun dépassement quel que soit l'offset
                let code = codes[(day % n + crew.offset % n) % n];
                let Some(period) = period_for_code(code)? else {
                    continue;
                };
                if let Some(other) = entry.get(period) {
                    bail!(
                        "day {day}: crews {other} and {} both land on {}",
                        crew.shift,
                        period.name()
                    );
                }
                entry.set(period, Some(crew.shift));
            }
            days.push(entry);
        }

        let shifts = self.crews.iter().map(|c| c.shift).collect();
        let mut cycle = CycleConfig::new(self.name.clone(), self.base_date, shifts, days)
            .with_context(|| format!("expanding rotation {}", self.name))?;
        if let Some(desc) = &self.description {
            cycle = cycle.with_description(desc.clone());
        }
        Ok(cycle)
    }
}

fn period_for_code(code: char) -> Result<Option<Period>> {
    match code {
        'M' => Ok(Some(Period::Morning)),
        'A' => Ok(Some(Period::Afternoon)),
        'N' => Ok(Some(Period::Night)),
        '-' => Ok(None),
        other => bail!("invalid pattern code {other:?} (expected M, A, N or -)"),
    }
}

/// Parse une liste d'équipes `A:0,B:2,...`.
pub fn parse_crews(raw: &str) -> Result<Vec<Crew>> {
    raw.split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (letter, offset) = chunk
                .split_once(':')
                .with_context(|| format!("invalid crew {chunk:?} (expected LETTER:OFFSET)"))?;
            let shift: ShiftId = letter.parse().map_err(anyhow::Error::msg)?;
            let offset = offset
                .trim()
                .parse()
                .with_context(|| format!("invalid offset for crew {shift}"))?;
            Ok(Crew { shift, offset })
        })
        .collect()
}
