//! Tripsheet CLI - travel itinerary kept in a directory of CSV sheets

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tripsheet::prelude::*;
use tripsheet::{TripSchemas, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "tripsheet")]
#[command(author, version, about = "Travel itinerary backed by a spreadsheet")]
struct Cli {
    /// Workbook directory (one CSV file per sheet); overrides the config
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Config file (default: ./tripsheet.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which record a write targets
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Explicit record id
    #[arg(long)]
    id: Option<String>,

    /// Sheet row number from an earlier fetch (header is row 1)
    #[arg(long)]
    row: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing sheets with their template headers
    Init,

    /// Print every table as JSON
    FetchAll {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Change fields of one itinerary event
    UpdateEvent {
        #[command(flatten)]
        target: Target,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        place: Option<String>,

        #[arg(long)]
        move_time: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Tick or untick a packing item
    TogglePacking {
        #[command(flatten)]
        target: Target,

        /// New packed state
        #[arg(long, action = clap::ArgAction::Set)]
        checked: bool,
    },

    /// Append an expense line
    AddExpense {
        /// Date (default: today, YYYY/MM/DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        desc: String,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long, default_value = "")]
        currency: String,

        #[arg(long, default_value = "")]
        paid_by: String,

        #[arg(long, default_value = "")]
        memo: String,
    },

    /// Answer JSON requests, one per stdin line, one response per stdout line
    Serve,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let schemas = TripSchemas::new(&config.sheets);
    let dir = config.store.path.as_path();

    match cli.command {
        Commands::Init => {
            let mut itinerary = open(dir, schemas, true)?;
            let created = itinerary
                .init_template()
                .with_context(|| format!("Failed to initialise '{}'", dir.display()))?;
            for sheet in &created {
                eprintln!("Created sheet '{}'", sheet);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::FetchAll { pretty } => {
            let itinerary = open(dir, schemas, false)?;
            print_json(&itinerary.fetch_all(), pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::UpdateEvent {
            target,
            time,
            title,
            place,
            move_time,
            note,
        } => {
            let mut itinerary = open(dir, schemas, false)?;
            let result = itinerary.update_event(&EventUpdate {
                id: target.id,
                row_index: target.row,
                time,
                title,
                place,
                move_time,
                note,
            });
            report(&result)
        }
        Commands::TogglePacking { target, checked } => {
            let mut itinerary = open(dir, schemas, false)?;
            let result = itinerary.toggle_packing(&PackingToggle {
                id: target.id,
                row_index: target.row,
                checked,
            });
            report(&result)
        }
        Commands::AddExpense {
            date,
            category,
            desc,
            amount,
            currency,
            paid_by,
            memo,
        } => {
            let mut itinerary = open(dir, schemas, false)?;
            let result = itinerary.add_expense(&NewExpense {
                date: date.unwrap_or_else(today),
                category,
                desc,
                amount,
                currency,
                paid_by,
                memo,
            });
            report(&result)
        }
        Commands::Serve => {
            let mut itinerary = open(dir, schemas, true)?;
            serve(&mut itinerary)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("tripsheet=debug,tripsheet_cli=debug")
        } else {
            EnvFilter::new("tripsheet=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<TripConfig> {
    let mut config = match &cli.config {
        Some(path) => TripConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => TripConfig::load_default(Path::new("."))
            .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))?,
    };

    // Command line wins over the file
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }

    Ok(config)
}

fn open(dir: &Path, schemas: TripSchemas, create: bool) -> Result<Itinerary<CsvDirStore>> {
    let store = if create {
        CsvDirStore::open_or_create(dir)
    } else {
        CsvDirStore::open(dir)
    }
    .with_context(|| format!("Failed to open workbook '{}'", dir.display()))?;
    tracing::debug!("workbook at {}", dir.display());

    Ok(Itinerary::with_schemas(store, schemas))
}

fn today() -> String {
    chrono::Local::now().format("%Y/%m/%d").to_string()
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to encode JSON")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
    Ok(())
}

fn report(result: &ActionResult) -> Result<ExitCode> {
    print_json(result, false)?;
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Single-threaded request loop: each line runs to completion before the
/// next is read.
fn serve<S: BackingStore>(itinerary: &mut Itinerary<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = itinerary.dispatch_json(&line);
        let text = serde_json::to_string(&response).context("Failed to encode JSON")?;
        writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}
