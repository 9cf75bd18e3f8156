//! # pila-cutoff
//!
//! Prints the PILA cut-off dates of a visit as JSON.

use std::path::PathBuf;

use clap::Parser;
use pila_cutoff::config::PilaConfig;
use pila_cutoff::{PilaDate, PilaSchedule, SolicitudRecord};
use tracing_subscriber::EnvFilter;

/// Compute monthly PILA payment cut-off dates for a visit window.
///
/// Datasets default to `PILA_CALENDAR_PATH` and `PILA_LIMITS_PATH` (a `.env`
/// file is honored).
#[derive(Parser, Debug)]
#[command(name = "pila-cutoff", version, about)]
struct Cli {
    /// Taxpayer ID (digits only)
    #[arg(long)]
    nit: String,

    /// First day of the visit (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    start: String,

    /// Last day of the visit (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    end: String,

    /// Re-derive statuses from the days left before each cut-off
    #[arg(long)]
    refresh: bool,

    /// Reference date for --refresh; defaults to the local date
    #[arg(long, requires = "refresh")]
    today: Option<String>,

    /// Labor calendar dataset
    #[arg(long)]
    calendar: Option<PathBuf>,

    /// Social-security limit dataset
    #[arg(long)]
    limits: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = PilaConfig::from_env()?;
    if let Some(path) = cli.calendar {
        config.calendar_path = path;
    }
    if let Some(path) = cli.limits {
        config.limits_path = path;
    }

    let schedule = PilaSchedule::from_config(&config)?;
    let record = SolicitudRecord {
        nit:         Some(cli.nit),
        visit_start: Some(cli.start),
        visit_end:   Some(cli.end),
    };

    let dates = if cli.refresh {
        let today = match cli.today {
            Some(value) => value.parse::<PilaDate>()?,
            None => PilaDate::today()?,
        };
        schedule.for_record(&record, &today)?
    } else {
        schedule.cutoffs(&record)?
    };

    println!("{}", serde_json::to_string_pretty(&dates)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
