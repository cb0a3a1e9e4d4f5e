use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dbcompare::api::{self, CompareOptions};
use dbcompare::config::{Config, DEFAULT_CONFIG_FILE};
use dbcompare::diff::bool_text;
use dbcompare::identifier::TableIdentifier;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dbcompare")]
#[command(about = "Compare the column schema of two SQL Server tables", long_about = None)]
struct Cli {
    /// JSON configuration file with both connection strings and tables
    #[arg(long, global = true, env = "DBCOMPARE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured source table (`table` or `schema.table`)
    #[arg(long, global = true)]
    source_table: Option<TableIdentifier>,

    /// Override the configured destination table
    #[arg(long, global = true)]
    destination_table: Option<TableIdentifier>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the two tables are equal
    Check {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Exit with status 1 when the tables differ
        #[arg(long)]
        exit_code: bool,
    },

    /// Show how the destination table must change to match the source
    Diff,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn verdict(is_equal: bool) -> &'static str {
    bool_text(is_equal)
}

fn load_options(cli: &Cli) -> Result<CompareOptions> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let mut options = CompareOptions::from_config(&config)?;
    if let Some(table) = cli.source_table.clone() {
        options = options.with_source_table(table);
    }
    if let Some(table) = cli.destination_table.clone() {
        options = options.with_destination_table(table);
    }
    Ok(options)
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = load_options(&cli)?;
    let source = options.source.table.clone();
    let destination = options.destination.table.clone();

    match cli.command {
        Commands::Check { json, exit_code } => {
            let result = api::compare(options)
                .await
                .with_context(|| format!("Failed to compare {source} with {destination}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", verdict(result.is_equal));
            }
            if exit_code && !result.is_equal {
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Diff => {
            let report = api::diff(options)
                .await
                .with_context(|| format!("Failed to diff {source} with {destination}"))?;
            if report.ends_with('\n') {
                print!("{report}");
            } else {
                println!("{report}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
