//! CLI entry point for the bikeshare explorer.
//!
//! Runs the interactive session by default, or prints a single report for a
//! selection given on the command line.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_stats::{
    calendar::{City, Day, Month, capitalize},
    config::Config,
    error::Error,
    filter::FilterCriteria,
    output::{print_pretty, write_json, write_report},
    records::RecordStore,
    session::{Session, build_report},
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Number of raw records shown per page
    #[arg(short = 'p', long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters, then browse statistics
    Explore,
    /// Print the statistics for one selection and exit
    Report {
        /// City to analyze ("chicago", "new york city" or "washington")
        #[arg(short, long)]
        city: City,

        /// Month to filter by (january..june), or "all"
        #[arg(short, long, default_value = "all")]
        month: Month,

        /// Day of week to filter by (monday..sunday), or "all"
        #[arg(long, default_value = "all")]
        day: Day,

        /// Print the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List supported cities and their data files
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = Config::from_env()
        .context("invalid configuration")?
        .with_overrides(cli.data_dir, cli.page_size.map(|size| size as usize));

    let _log_guard = init_logging(&config.log_file_path);
    info!(data_dir = %config.data_dir.display(), page_size = config.page_size, "Starting");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let store = RecordStore::new(&config.data_dir);
            let stdin = io::stdin();
            let mut session =
                Session::new(stdin.lock(), io::stdout().lock(), store, config.page_size);
            session.run().context("interactive session failed")?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => {
            let criteria = FilterCriteria::new(city, month, day);
            let mut store = RecordStore::new(&config.data_dir);
            let mut stdout = io::stdout().lock();

            match build_report(&mut store, criteria) {
                Ok(report) => {
                    print_pretty(&report);
                    if json {
                        write_json(&mut stdout, &report)?;
                    } else {
                        write_report(&mut stdout, &report)?;
                    }
                }
                Err(Error::NoData(e)) => {
                    warn!(city = %city, month = %month, day = %day, "Empty selection");
                    writeln!(stdout, "{}.", capitalize(&e.to_string()))?;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to build report for {city}"));
                }
            }
        }
        Commands::Cities => {
            let mut stdout = io::stdout().lock();
            for city in City::ALL {
                let path = config.data_dir.join(city.file_name());
                let status = if path.exists() { "found" } else { "missing" };
                writeln!(stdout, "{:<15} {:<20} {}", city.name(), city.file_name(), status)?;
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The stderr layer defaults to `warn` so log lines do not interleave with
/// the interactive prompts.
fn init_logging(log_file_path: &Path) -> WorkerGuard {
    let log_dir = log_file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
