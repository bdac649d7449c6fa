use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Thème d'affichage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "clair" => Ok(Theme::Light),
            "dark" | "sombre" => Ok(Theme::Dark),
            other => bail!("unknown theme: {other} (expected light or dark)"),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Préférences utilisateur, seul état persisté.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cycle: Option<String>,
}

pub trait PrefsStorage {
    /// Charge les préférences depuis un support.
    fn load(&self) -> anyhow::Result<Preferences>;
    /// Sauvegarde de manière atomique.
    fn save(&self, prefs: &Preferences) -> anyhow::Result<()>;
}

pub struct JsonPrefs {
    path: PathBuf,
}

impl JsonPrefs {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Préférences du fichier, ou valeurs par défaut s'il n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        self.load()
    }
}

impl PrefsStorage for JsonPrefs {
    fn load(&self) -> anyhow::Result<Preferences> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let prefs: Preferences = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(prefs)
    }

    fn save(&self, prefs: &Preferences) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(prefs)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), theme = %prefs.theme, "saved preferences");
        Ok(())
    }
}
