#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use roulement::{
    io,
    prefs::{JsonPrefs, PrefsStorage, Theme},
    resolver::{calendar, day_schedule, resolve},
    rotation::{parse_crews, RotationPlan},
    store::{export_cycle_json, load_cycle_from_file, CycleStore},
    Catalog, CycleConfig, Renderer, TextRenderer, DEFAULT_CYCLE,
};
use std::io::IsTerminal;
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Quelle équipe est de quart ? (roulement 3x8)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de préférences (thème, cycle par défaut)
    #[arg(long, global = true, default_value = "roulement.json")]
    prefs: String,

    /// Répertoire de cycles utilisateur (fichiers JSON)
    #[arg(long, global = true)]
    cycles_dir: Option<String>,

    /// Cycle à utiliser (sinon préférence, sinon 84)
    #[arg(long, global = true)]
    cycle: Option<String>,

    /// Désactive les couleurs
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Équipe de quart maintenant
    Now,

    /// Équipe de quart à un instant donné
    At {
        /// YYYY-MM-DDTHH:MM[:SS], RFC3339, ou une date seule (midi)
        #[arg(long)]
        at: String,
    },

    /// Statut de chaque équipe pour une journée
    Day {
        /// YYYY-MM-DD (défaut : aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Statuts jour par jour sur une période, avec export CSV optionnel
    Calendar {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Rafraîchit l'équipe courante à intervalle régulier (Ctrl-C pour quitter)
    Watch {
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Nombre de rafraîchissements avant de s'arrêter
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Lister les cycles disponibles
    Cycles,

    /// Afficher (ou exporter) la table d'un cycle en JSON
    ShowCycle {
        #[arg(long)]
        out: Option<String>,
    },

    /// Valider un fichier de cycle
    Validate {
        #[arg(long)]
        file: String,
    },

    /// Générer un cycle à partir d'un motif décalé par équipe
    Generate {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        base_date: String,
        #[arg(long)]
        length: usize,
        /// Codes M, A, N ou - (ex. "MMAANN--")
        #[arg(long)]
        pattern: String,
        /// liste "A:0,B:2,..."
        #[arg(long)]
        crews: String,
        #[arg(long)]
        description: Option<String>,
        /// Fichier de sortie (sinon enregistré dans --cycles-dir)
        #[arg(long)]
        out: Option<String>,
    },

    /// Thème d'affichage
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Définir le cycle par défaut
    UseCycle { name: String },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let prefs_store = JsonPrefs::open(&cli.prefs)?;
    let mut prefs = prefs_store.load_or_default()?;

    let mut catalog = Catalog::builtin()?;
    if let Some(dir) = &cli.cycles_dir {
        catalog = catalog.with_store(&CycleStore::new(dir))?;
    }

    let cycle_name = cli
        .cycle
        .clone()
        .or_else(|| prefs.default_cycle.clone())
        .unwrap_or_else(|| DEFAULT_CYCLE.to_string());
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let renderer = TextRenderer::new(prefs.theme, color);

    let code = match cli.cmd {
        Commands::Now => {
            let cycle = catalog.require(&cycle_name)?;
            let now = Local::now().naive_local();
            print!("{}", renderer.render_now(cycle.name(), &resolve(now, cycle)));
            0
        }
        Commands::At { at } => {
            let cycle = catalog.require(&cycle_name)?;
            let at = io::parse_timestamp(&at)?;
            print!("{}", renderer.render_now(cycle.name(), &resolve(at, cycle)));
            0
        }
        Commands::Day { date } => {
            let cycle = catalog.require(&cycle_name)?;
            let date = match date {
                Some(raw) => io::parse_date(&raw)?,
                None => Local::now().date_naive(),
            };
            print!("{}", renderer.render_day(&day_schedule(date, cycle)));
            0
        }
        Commands::Calendar { from, to, out_csv } => {
            let cycle = catalog.require(&cycle_name)?;
            let days = calendar(cycle, io::parse_date(&from)?, io::parse_date(&to)?)?;
            if let Some(path) = out_csv {
                io::export_calendar_csv(path, cycle, &days)?;
            }
            // impression compacte
            for day in &days {
                let duties: Vec<String> = day
                    .duties
                    .iter()
                    .map(|(shift, duty)| format!("{shift}={duty}"))
                    .collect();
                println!("{} | {:>2} | {}", day.date, day.index, duties.join(" "));
            }
            0
        }
        Commands::Watch { interval_ms, ticks } => {
            let cycle = catalog.require(&cycle_name)?;
            watch(cycle, &renderer, Duration::from_millis(interval_ms.max(1)), ticks)?;
            0
        }
        Commands::Cycles => {
            for cycle in catalog.iter() {
                let marker = if cycle.name() == cycle_name { "*" } else { " " };
                println!(
                    "{marker} {} | {} days | base {} | shifts {} | {}",
                    cycle.name(),
                    cycle.len(),
                    cycle.base_date(),
                    cycle
                        .shifts()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                    cycle.description().unwrap_or("-")
                );
            }
            0
        }
        Commands::ShowCycle { out } => {
            let cycle = catalog.require(&cycle_name)?;
            match out {
                Some(path) => {
                    export_cycle_json(&path, cycle)?;
                    println!("Cycle {} written to {path}", cycle.name());
                }
                None => println!("{}", serde_json::to_string_pretty(cycle)?),
            }
            0
        }
        Commands::Validate { file } => {
            let cycle = load_cycle_from_file(&file)?;
            let warnings = cycle.lint();
            if warnings.is_empty() {
                println!("OK: cycle {} ({} days)", cycle.name(), cycle.len());
                0
            } else {
                eprintln!("Found {} warning(s)", warnings.len());
                for w in &warnings {
                    eprintln!("  {w}");
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::Generate {
            name,
            base_date,
            length,
            pattern,
            crews,
            description,
            out,
        } => {
            let plan = RotationPlan {
                name,
                description,
                base_date: io::parse_date(&base_date)?,
                length,
                pattern,
                crews: parse_crews(&crews)?,
            };
            let cycle = plan.expand()?;
            let path = match (out, &cli.cycles_dir) {
                (Some(path), _) => {
                    export_cycle_json(&path, &cycle)?;
                    path
                }
                (None, Some(dir)) => CycleStore::new(dir).save(&cycle)?.display().to_string(),
                (None, None) => anyhow::bail!("--out or --cycles-dir is required"),
            };
            println!("Cycle {} ({} days) written to {path}", cycle.name(), cycle.len());
            0
        }
        Commands::Theme { action } => {
            match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    prefs.theme = prefs.theme.toggled();
                    prefs_store.save(&prefs)?;
                }
                ThemeAction::Set { theme } => {
                    prefs.theme = theme;
                    prefs_store.save(&prefs)?;
                }
            }
            println!("Theme: {}", prefs.theme);
            0
        }
        Commands::UseCycle { name } => {
            catalog.require(&name)?;
            prefs.default_cycle = Some(name.clone());
            prefs_store.save(&prefs)?;
            println!("Default cycle: {name}");
            0
        }
    };

    std::process::exit(code);
}

/// Boucle de rafraîchissement : le résolveur est rappelé à chaque tick, sans état partagé.
fn watch(
    cycle: &CycleConfig,
    renderer: &TextRenderer,
    interval: Duration,
    ticks: Option<u64>,
) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting refresh timer")?;

    rt.block_on(async {
        let mut timer = tokio::time::interval(interval);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut done = 0u64;
        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let now = Local::now().naive_local();
                    print!("{}", renderer.render_now(cycle.name(), &resolve(now, cycle)));
                    done += 1;
                    if ticks.is_some_and(|t| done >= t) {
                        break;
                    }
                }
                _ = &mut ctrl_c => break,
            }
        }
    });
    Ok(())
}
