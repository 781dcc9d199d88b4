//! datatidy - clean and convert tabular data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use datatidy::clean::clean;
use datatidy::config::Config;
use datatidy::export::{download_filename, export, Format};
use datatidy::loader::load_csv;
use datatidy::preview::{render_preview, render_summary};

/// Clean and convert tabular data (CSV in, CSV/Excel out)
#[derive(Parser, Debug)]
#[command(name = "datatidy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Remove duplicate rows and fill missing values with "Missing"
    #[arg(long)]
    clean: bool,

    /// Column(s) to keep, comma-separated (default: all, in original order)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Export format: csv or excel
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// Output file (default: cleaned_data.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show the first N rows before converting
    #[arg(short, long, value_name = "N")]
    preview: Option<usize>,

    /// Show column types and which columns are numeric
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Parse the tag through the library so unknown formats surface the
    // same UnsupportedFormat error embedding callers would see
    let format: Format = cli.format.parse()?;

    let mut config = Config::new(cli.input)
        .with_clean(cli.clean)
        .with_columns(cli.columns)
        .with_format(format);
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }
    if let Some(rows) = cli.preview {
        config = config.with_preview_rows(rows);
    }

    let stats = cli.stats;
    run_pipeline(&config, stats)
}

fn run_pipeline(config: &Config, stats: bool) -> Result<()> {
    let bytes = std::fs::read(&config.input)
        .with_context(|| format!("Failed to read input file: {}", config.input.display()))?;

    let mut table = load_csv(&bytes)
        .with_context(|| format!("Failed to parse CSV file: {}", config.input.display()))?;

    if let Some(limit) = config.preview_rows {
        print!("{}", render_preview(&table, limit));
    }

    if config.clean {
        let before = table.row_count();
        table = clean(table);
        println!(
            "Cleaned: {} duplicate row(s) removed, missing values filled",
            before - table.row_count()
        );
    }

    if !config.columns.is_empty() {
        table = table
            .select(&config.columns)
            .context("Failed to select columns")?;
    }

    if stats {
        print!("{}", render_summary(&table));
    }

    let data = export(&table, config.format).context("Failed to serialize table")?;

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(download_filename(config.format)));
    std::fs::write(&output, &data)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    println!(
        "Wrote {} row(s), {} column(s) to {} ({})",
        table.row_count(),
        table.column_count(),
        output.display(),
        config.format.mime_type()
    );

    Ok(())
}
