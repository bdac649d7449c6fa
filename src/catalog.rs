//! Cycles disponibles : tables embarquées + cycles utilisateur.

use crate::cycle::CycleConfig;
use crate::store::CycleStore;
use anyhow::{Context, Result};

/// Nom du cycle utilisé quand rien n'est précisé.
pub const DEFAULT_CYCLE: &str = "84";

const BUILTIN_SOURCES: [(&str, &str); 4] = [
    ("84", include_str!("../rosters/cycle-84.json")),
    ("42", include_str!("../rosters/cycle-42.json")),
    ("14", include_str!("../rosters/cycle-14.json")),
    ("8", include_str!("../rosters/cycle-8.json")),
];

/// Charge et valide les cycles embarqués.
pub fn builtin_cycles() -> Result<Vec<CycleConfig>> {
    BUILTIN_SOURCES
        .iter()
        .map(|(name, json)| {
            serde_json::from_str::<CycleConfig>(json)
                .with_context(|| format!("parsing built-in cycle {name}"))
        })
        .collect()
}

/// Ensemble de cycles indexé par nom.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cycles: Vec<CycleConfig>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        let cycles = builtin_cycles()?;
        #[cfg(feature = "logging")]
        tracing::debug!(count = cycles.len(), "loaded built-in cycles");
        Ok(Self { cycles })
    }

    /// Ajoute les cycles d'un répertoire ; un nom existant est remplacé.
    pub fn with_store(mut self, store: &CycleStore) -> Result<Self> {
        for cycle in store.list()? {
            self.insert(cycle);
        }
        Ok(self)
    }

    pub fn insert(&mut self, cycle: CycleConfig) {
        if let Some(slot) = self.cycles.iter_mut().find(|c| c.name() == cycle.name()) {
            #[cfg(feature = "logging")]
            tracing::warn!(name = cycle.name(), "cycle overrides an existing one");
            *slot = cycle;
        } else {
            self.cycles.push(cycle);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CycleConfig> {
        self.cycles.iter().find(|c| c.name() == name)
    }

    /// Comme `get`, avec un message listant les cycles connus.
    pub fn require(&self, name: &str) -> Result<&CycleConfig> {
        self.get(name).with_context(|| {
            format!(
                "unknown cycle '{name}'. Available cycles: {}",
                self.names().join(", ")
            )
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.cycles.iter().map(CycleConfig::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CycleConfig> {
        self.cycles.iter()
    }
}
