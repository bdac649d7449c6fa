use crate::model::Duty;
use crate::prefs::Theme;
use crate::resolver::{DaySchedule, Resolution};
use colored::{ColoredString, Colorize};
use std::fmt::Write as _;

/// Permet de customiser le rendu (terminal, texte brut, etc.).
pub trait Renderer {
    fn render_now(&self, cycle: &str, resolution: &Resolution) -> String;
    fn render_day(&self, day: &DaySchedule) -> String;
}

/// Rendu texte pour le terminal, coloré selon le thème si `color` est actif.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer {
    pub theme: Theme,
    pub color: bool,
}

impl TextRenderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    fn accent(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_cyan().bold(),
            Theme::Light => s.blue().bold(),
        }
    }

    fn paint(&self, s: &str, styled: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            styled(s).to_string()
        } else {
            s.to_string()
        }
    }
}

impl Renderer for TextRenderer {
    fn render_now(&self, cycle: &str, r: &Resolution) -> String {
        let shift = r
            .shift
            .map(|s| format!("Shift {s}"))
            .unwrap_or_else(|| "No shift".to_string());
        format!(
            "{} ({})\n{} | cycle {} | day {} ({})\n",
            self.paint(&shift, |s| self.accent(s)),
            r.period.label(),
            self.paint(&r.at.format("%Y-%m-%d %H:%M:%S").to_string(), |s| s.dimmed()),
            cycle,
            r.index,
            r.attributed_date,
        )
    }

    fn render_day(&self, day: &DaySchedule) -> String {
        let mut out = String::new();
        let header = format!("{} | cycle {} | day {}", day.date, day.cycle, day.index);
        let _ = writeln!(out, "{}", self.paint(&header, |s| s.bold()));
        for (shift, duty) in &day.duties {
            let label = match duty {
                Duty::Resting => self.paint(duty.label(), |s| s.dimmed()),
                Duty::On(_) => self.paint(duty.label(), |s| self.accent(s)),
            };
            let _ = writeln!(out, "Shift {shift}  {label}");
        }
        out
    }
}
