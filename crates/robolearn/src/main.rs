mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use commands::{handle_command, Command};
use config::ProjectConfig;
use robolearn_dataset::{Dataset, DEFAULT_DATA_DIR};
use robolearn_logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "robolearn",
    about = "Inspect and convert exported robot learning sessions",
    version,
    author
)]
struct Cli {
    /// Data directory containing exports/ (default: ../data)
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load only these sessions instead of the manifest (repeatable)
    #[arg(short, long = "session", global = true)]
    sessions: Vec<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Log level (default: info, or log_level from robolearn.toml)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    robolearn_logging::init_tracing(
        config.log_level(cli.log_level.as_deref()),
        cli.log_format.into(),
    );

    let data_dir = config.data_dir(cli.data_dir.as_deref(), DEFAULT_DATA_DIR);
    let dataset = load_dataset(data_dir, &cli.sessions)?;

    handle_command(cli.command.unwrap_or(Command::Overview), &dataset, &config)
}

fn load_dataset(data_dir: PathBuf, sessions: &[String]) -> Result<Dataset> {
    let mut dataset = Dataset::new(data_dir);

    if sessions.is_empty() {
        let skipped = dataset
            .load_from_manifest()
            .context("Failed to load dataset manifest")?;
        if !skipped.is_empty() {
            tracing::info!(
                ?skipped,
                "{} session(s) listed in the manifest were skipped",
                skipped.len()
            );
        }
    } else {
        for id in sessions {
            dataset
                .load_session(id)
                .with_context(|| format!("Failed to load session {}", id))?;
        }
    }

    Ok(dataset)
}
