#![forbid(unsafe_code)]
//! Roulement — quelle équipe est de quart (3x8) à un instant donné.
//!
//! - Tables de cycle immuables (embarquées ou fichiers JSON), répétées autour d'une date de base.
//! - Résolution pure : tranche, jour de rattachement (la fin de nuit appartient à la veille), équipe.
//! - Tout en heure murale locale (`NaiveDateTime`) ; le fuseau est l'affaire de l'appelant.

pub mod catalog;
pub mod cycle;
pub mod io;
pub mod model;
pub mod prefs;
pub mod render;
pub mod resolver;
pub mod rotation;
pub mod store;

pub use catalog::{builtin_cycles, Catalog, DEFAULT_CYCLE};
pub use cycle::{CycleConfig, CycleError, CycleFile, CycleWarning, MAX_CYCLE_LENGTH};
pub use model::{DayEntry, Duty, Period, ShiftId};
pub use prefs::{JsonPrefs, Preferences, PrefsStorage, Theme};
pub use render::{Renderer, TextRenderer};
pub use resolver::{calendar, day_schedule, resolve, DaySchedule, Resolution};
pub use rotation::{parse_crews, Crew, RotationPlan};
pub use store::{export_cycle_json, load_cycle_from_file, CycleStore};
