use crate::cycle::{is_valid_name, CycleConfig};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Cycles utilisateur persistés sur disque (un fichier JSON par cycle).
#[derive(Debug, Clone)]
pub struct CycleStore {
    base_dir: PathBuf,
}

impl CycleStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating cycle directory {}", self.base_dir.display()))
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_name(name) {
            bail!("invalid cycle name {name:?}");
        }
        Ok(self.base_dir.join(format!("cycle-{name}.json")))
    }

    pub fn save(&self, cycle: &CycleConfig) -> Result<PathBuf> {
        let path = self.path_for(cycle.name())?;
        self.ensure_dir()?;
        export_cycle_json(&path, cycle)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<CycleConfig> {
        load_cycle_from_file(self.path_for(name)?)
    }

    /// Liste les cycles valides ; les fichiers illisibles sont ignorés avec un avertissement.
    pub fn list(&self) -> Result<Vec<CycleConfig>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut cycles = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match load_cycle_from_file(&path) {
                Ok(c) => cycles.push(c),
                Err(err) => {
                    eprintln!("Warning: could not load cycle {}: {err:#}", path.display());
                }
            }
        }
        cycles.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(cycles)
    }
}

pub fn load_cycle_from_file<P: AsRef<Path>>(path: P) -> Result<CycleConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading cycle {}", path.display()))?;
    let cycle: CycleConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing cycle {}", path.display()))?;
    #[cfg(feature = "logging")]
    tracing::debug!(name = cycle.name(), path = %path.display(), "loaded cycle file");
    Ok(cycle)
}

pub fn export_cycle_json<P: AsRef<Path>>(path: P, cycle: &CycleConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(cycle)?;
    fs::write(path.as_ref(), json)
        .with_context(|| format!("writing cycle {}", path.as_ref().display()))?;
    Ok(())
}
