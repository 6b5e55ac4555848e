mod chart;
mod summary;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dailytally_core::input::normalize_separators;
use dailytally_core::{
    ensure_input, parse, ChartUseCase, Classifier, DateToken, FileSettingsRepository,
    ParsedDataset, Settings, SettingsRepository, WeekendPolicy, BLANK_INPUT_NOTICE,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dailytally")]
#[command(about = "Chart daily amounts written as 4月7号:8550", long_about = None)]
struct Cli {
    /// Read entries from a file instead of stdin
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Reference year used for weekdays and holidays
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Weekend days: friday-saturday or saturday-sunday
    #[arg(long, global = true)]
    weekend: Option<WeekendPolicy>,

    /// Directory holding settings.json (default: ~/.dailytally)
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the bar + average chart in the terminal
    Chart,
    /// Print monthly totals and the grand total
    Summary,
    /// Print every entry with its weekday and day type
    Daily,
    /// Classify dates such as 4月7号 without reading input
    Classify {
        #[arg(required = true)]
        dates: Vec<String>,
    },
    /// List the holiday tables of the reference year
    Holidays,
    /// Print chart data as JSON
    Export,
    /// Write a settings file with the current settings for editing
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries tables and JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(cli: &Cli, repo: &FileSettingsRepository) -> Result<Settings> {
    let mut settings = repo.load()?;
    if let Some(year) = cli.year {
        settings.reference_year = year;
    }
    if let Some(policy) = cli.weekend {
        settings.weekend_policy = policy;
    }
    info!(
        year = settings.reference_year,
        weekend = %settings.weekend_policy,
        "using settings"
    );
    Ok(settings)
}

fn read_dataset(input: Option<&PathBuf>) -> Result<ParsedDataset> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Could not read stdin")?;
            buf
        }
    };

    let raw = ensure_input(&raw).context(BLANK_INPUT_NOTICE)?;
    let dataset = parse(raw);
    debug!(entries = dataset.entries.len(), "input parsed");
    Ok(dataset)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let repo = FileSettingsRepository::new(cli.settings_dir.clone())?;
    let settings = load_settings(&cli, &repo)?;
    let classifier = Classifier::from_settings(&settings);
    let usecase = ChartUseCase::new(&classifier);

    match &cli.command {
        Some(Commands::Summary) => {
            let dataset = read_dataset(cli.input.as_ref())?;
            summary::show_summary(&dataset);
        }
        Some(Commands::Daily) => {
            let dataset = read_dataset(cli.input.as_ref())?;
            summary::show_daily(&usecase.build(&dataset), &classifier);
        }
        Some(Commands::Classify { dates }) => {
            let tokens: Vec<DateToken> = dates
                .iter()
                .map(|d| DateToken::new(normalize_separators(d).trim()))
                .collect();
            summary::show_classification(&tokens, &classifier);
        }
        Some(Commands::Holidays) => {
            summary::show_holidays(&classifier);
        }
        Some(Commands::Export) => {
            let dataset = read_dataset(cli.input.as_ref())?;
            let chart = usecase.build(&dataset);
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &chart)?;
            println!();
        }
        Some(Commands::Init { force }) => {
            if repo.path().exists() && !force {
                println!("Settings already exist at {} (use --force to overwrite).", repo.path().display());
                return Ok(());
            }
            repo.save(&settings)?;
            println!("Settings written to {}", repo.path().display());
        }
        Some(Commands::Chart) | None => {
            let dataset = read_dataset(cli.input.as_ref())?;
            if dataset.is_empty() {
                println!("No dated entries found.");
                return Ok(());
            }
            let data = usecase.build(&dataset);
            let windows = usecase.month_windows(&data);
            chart::run(data, windows)?;
        }
    }
    Ok(())
}
