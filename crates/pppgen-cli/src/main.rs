//! pppgen CLI - Progress/Plans/Problems report generator
//!
//! Command-line front end: ingests a CSV project-tracking export and prints
//! the three rendered report sections, or validates the export's schema.

mod pipeline;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pppgen_classify::ClassifyPolicy;
use pppgen_core::Summarizer;
use pppgen_render::HttpSummarizer;
use pppgen_table::{adapt, ColumnMap, Table};

#[derive(Parser)]
#[command(name = "pppgen")]
#[command(author, version, about = "Progress/Plans/Problems report generator", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PPP report from a tracking export
    Report {
        /// Input CSV file, or a directory of per-sheet CSV exports
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reporting date (defaults to today)
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Leading banner rows to skip before the header row
        #[arg(long, default_value_t = 0)]
        skip_rows: usize,

        /// Sheet name, when FILE is a directory of per-sheet exports
        #[arg(long)]
        sheet: Option<String>,

        /// Classification rule set
        #[arg(long, value_enum, default_value = "board")]
        policy: Policy,

        /// Also report blocked tasks as overdue (legacy double reporting)
        #[arg(long)]
        blocked_as_overdue: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Summarize task lines via the text-generation backend
        #[arg(long)]
        summarize: bool,

        /// Summarization endpoint (chat-completions style)
        #[arg(long, default_value = "https://api.openai.com/v1/chat/completions")]
        summary_url: String,

        /// Summarization model name
        #[arg(long)]
        summary_model: Option<String>,

        /// API key for the summarization backend
        #[arg(long, env = "PPPGEN_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Validate an export's schema without generating a report
    Check {
        /// Input CSV file, or a directory of per-sheet CSV exports
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Leading banner rows to skip before the header row
        #[arg(long, default_value_t = 0)]
        skip_rows: usize,

        /// Sheet name, when FILE is a directory of per-sheet exports
        #[arg(long)]
        sheet: Option<String>,
    },
}

/// Classification rule set (one per source schema variant)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Board export: Timeline column, closed Plan status list
    Board,
    /// Plain spreadsheet: Complete Date column, open Plan status list
    Spreadsheet,
}

impl Policy {
    fn to_policy(self, blocked_as_overdue: bool) -> ClassifyPolicy {
        let policy = match self {
            Policy::Board => ClassifyPolicy::board(),
            Policy::Spreadsheet => ClassifyPolicy::spreadsheet(),
        };
        if blocked_as_overdue {
            policy.report_blocked_as_overdue()
        } else {
            policy
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Section headers plus HTML-fragment bodies
    Text,
    /// One HTML fragment with bold section headers
    Html,
    /// JSON object with the three section strings
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file,
            date,
            skip_rows,
            sheet,
            policy,
            blocked_as_overdue,
            format,
            output,
            summarize,
            summary_url,
            summary_model,
            api_key,
        } => {
            let table = load_table(&file, sheet.as_deref(), skip_rows)?;
            let today = date.unwrap_or_else(|| Local::now().date_naive());

            let summarizer = if summarize {
                let api_key = api_key
                    .context("--summarize requires an API key (--api-key or PPPGEN_API_KEY)")?;
                let mut client = HttpSummarizer::new(summary_url, api_key)?;
                if let Some(model) = summary_model {
                    client = client.model(model);
                }
                Some(client)
            } else {
                None
            };

            let report = pipeline::generate(
                &table,
                policy.to_policy(blocked_as_overdue),
                today,
                summarizer.as_ref().map(|s| s as &dyn Summarizer),
            )?;

            let rendered = match format {
                Format::Text => format!(
                    "Progress [Last Week]\n{}\n\nPlans [Next Two Months]\n{}\n\nProblems [Ongoing]\n{}\n",
                    report.progress, report.plans, report.problems
                ),
                Format::Html => format!(
                    "<b>Progress [Last Week]</b><br><br>{}<b>Plans [Next Two Months]</b><br><br>{}<b>Problems [Ongoing]</b><br><br>{}",
                    report.progress, report.plans, report.problems
                ),
                Format::Json => serde_json::to_string_pretty(&report)?,
            };

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }
        }

        Commands::Check {
            file,
            skip_rows,
            sheet,
        } => {
            let table = load_table(&file, sheet.as_deref(), skip_rows)?;
            let map = ColumnMap::resolve(&table)?;
            let tasks = adapt(&table)?;

            println!("Columns resolved:");
            println!("  name:                 {}", table.columns[map.name]);
            println!("  status:               {}", table.columns[map.status]);
            print_optional(&table, "target date", map.target_date);
            print_optional(&table, "complete date", map.complete_date);
            print_optional(&table, "original target date", map.original_target_date);
            print_optional(&table, "initiative", map.initiative);
            print_optional(&table, "owner", map.owner);
            print_optional(&table, "comments", map.comment);
            println!("Task rows: {}", tasks.len());
        }
    }

    Ok(())
}

fn print_optional(table: &Table, label: &str, col: Option<usize>) {
    let value = col.map_or("(absent)", |c| table.columns[c].as_str());
    println!("  {:<21} {}", format!("{label}:"), value);
}

/// Resolve the input path and read the table.
///
/// Workbook sheets have no direct CSV analog; a directory of per-sheet
/// exports stands in for the workbook, with `--sheet` picking the file.
fn load_table(file: &Path, sheet: Option<&str>, skip_rows: usize) -> Result<Table> {
    let path = if file.is_dir() {
        let sheet = match sheet {
            Some(s) => s,
            None => bail!(
                "{} is a directory of sheet exports; pick one with --sheet",
                file.display()
            ),
        };
        file.join(format!("{sheet}.csv"))
    } else {
        file.to_path_buf()
    };

    Table::from_csv_path(&path, skip_rows)
        .with_context(|| format!("failed to ingest {}", path.display()))
}
