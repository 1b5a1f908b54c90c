use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use robolearn_dataset::{Dataset, DatasetStats, Table, TrainTestSplit};

use crate::config::ProjectConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Statistics, a row preview, per-sender counts and a sample split
    Overview,

    /// Show aggregate statistics
    Stats {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the flattened one-row-per-message table
    Rows {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of rows to show (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit per-message training records as JSON
    Records {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit compact records as JSON lines instead of one full array
        #[arg(long)]
        stream: bool,
    },

    /// Split rows into train and test partitions
    Split {
        #[command(flatten)]
        filter: FilterArgs,

        /// Fraction of rows held out for testing
        #[arg(long)]
        test_size: Option<f64>,

        /// Seed for a reproducible partition
        #[arg(long)]
        seed: Option<u64>,

        /// Output both partitions as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Message filters shared by the dataset commands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Keep only messages from this sender
    #[arg(long)]
    pub sender: Option<String>,

    /// Keep only messages carrying at least one label
    #[arg(long)]
    pub labeled: bool,

    /// Keep only messages carrying a label of this type
    #[arg(long)]
    pub label_type: Option<String>,
}

impl FilterArgs {
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let mut filtered = match self.sender {
            Some(ref sender) => dataset.filter_by_sender(sender),
            None => dataset.clone(),
        };

        if self.labeled || self.label_type.is_some() {
            filtered = filtered.filter_by_labels(self.label_type.as_deref());
        }

        filtered
    }
}

pub fn handle_command(command: Command, dataset: &Dataset, config: &ProjectConfig) -> Result<()> {
    match command {
        Command::Overview => print_overview(dataset, config)?,
        Command::Stats { filter, json } => {
            let stats = filter.apply(dataset).statistics();

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        Command::Rows {
            filter,
            limit,
            json,
        } => {
            let table = filter.apply(dataset).to_table()?;
            let table = match limit {
                Some(n) => table.head(n),
                None => table,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(table.rows())?);
            } else if table.is_empty() {
                println!("{}", "No messages found.".dimmed());
            } else {
                print_table(&table);
            }
        }
        Command::Records { filter, stream } => {
            let dataset = filter.apply(dataset);

            if stream {
                for record in dataset.stream_records()? {
                    println!("{}", serde_json::to_string(&record)?);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&dataset.to_records()?)?);
            }
        }
        Command::Split {
            filter,
            test_size,
            seed,
            json,
        } => {
            let test_size = config.test_size(test_size, robolearn_dataset::DEFAULT_TEST_SIZE);
            let seed = config.seed(seed);
            let split = filter.apply(dataset).split_train_test(test_size, seed)?;

            if json {
                let value = serde_json::json!({
                    "train": split.train.rows(),
                    "test": split.test.rows(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_split(&split);
            }
        }
    }

    Ok(())
}

fn print_overview(dataset: &Dataset, config: &ProjectConfig) -> Result<()> {
    let stats = dataset.statistics();
    print_stats(&stats);

    println!();
    println!("{}", "=== Row Preview ===".bright_blue().bold());
    let table = dataset.to_table()?;
    if table.is_empty() {
        println!("{}", "No messages found.".dimmed());
    } else {
        print_table(&table.head(5));
    }

    println!();
    println!("{}", "=== Filters ===".bright_blue().bold());
    for sender in stats.messages_by_sender.keys() {
        let rows = dataset.filter_by_sender(sender).to_table()?.len();
        println!("  {:<20} {} messages", sender, rows);
    }
    let labeled = dataset.filter_by_labels(None).to_table()?.len();
    println!("  {:<20} {} messages", "(labeled)", labeled);

    println!();
    let test_size = config.test_size(None, robolearn_dataset::DEFAULT_TEST_SIZE);
    let seed = config.seed(None).or(Some(42));
    match dataset.split_train_test(test_size, seed) {
        Ok(split) => print_split(&split),
        Err(e) => println!("{}  {}", "Split:".dimmed(), e.to_string().bright_yellow()),
    }

    Ok(())
}

fn print_stats(stats: &DatasetStats) {
    println!("{}", "=== Dataset Statistics ===".bright_blue().bold());
    println!("{}  {}", "Total Sessions:".dimmed(), stats.total_sessions);
    println!("{}  {}", "Total Messages:".dimmed(), stats.total_messages);
    println!("{}  {}", "Total Labels:".dimmed(), stats.total_labels);
    println!(
        "{}  {:.2}",
        "Avg Messages/Session:".dimmed(),
        stats.avg_messages_per_session
    );
    println!(
        "{}  {:.2}",
        "Avg Labels/Message:".dimmed(),
        stats.avg_labels_per_message
    );

    if !stats.messages_by_sender.is_empty() {
        println!();
        println!("{}", "By Sender:".dimmed());
        for (sender, count) in &stats.messages_by_sender {
            println!("  {:<20} {} messages", sender, count);
        }
    }
}

fn print_table(table: &Table) {
    let header: Vec<String> = table
        .columns()
        .iter()
        .map(|c| format!("{:<18}", truncate(c, 18)))
        .collect();
    println!("{}", header.join(" ").dimmed());

    for row in table.rows() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("{:<18}", truncate(&render_cell(&row.cell(c)), 18)))
            .collect();
        println!("{}", cells.join(" "));
    }
}

fn print_split(split: &TrainTestSplit) {
    println!("{}", "=== Train/Test Split ===".bright_blue().bold());
    println!("{}  {}", "Train set size:".dimmed(), split.train.len());
    println!("{}  {}", "Test set size:".dimmed(), split.test.len());
}

fn render_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
