//! Generate subcommand for churn-synth
//!
//! Generates the synthetic churn tables from configuration and writes
//! them as CSV files into the raw-data directory.

use crate::config::ConfigLoader;
use crate::generate::{Dataset, DatasetGenerator, GeneratorSettings};
use crate::output::{CsvWriter, OutputFiles, raw_dir, to_csv_string};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the generate subcommand
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Number of customers (overrides data.num_customers)
    #[arg(short = 'n', long, value_name = "N")]
    pub customers: Option<usize>,

    /// Random seed (overrides random.seed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output directory (overrides data.raw_dir)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Gzip-compress the CSV files (appends .gz)
    #[arg(long)]
    pub gzip: bool,

    /// Rows of each table to print after generation
    #[arg(long, default_value_t = 3, value_name = "ROWS")]
    pub preview: usize,
}

impl GenerateArgs {
    /// Apply CLI overrides on top of configured settings.
    pub fn apply(&self, settings: &mut GeneratorSettings) {
        if let Some(customers) = self.customers {
            settings.num_customers = customers;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
    }
}

/// What a generate run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub dataset: Dataset,
    pub files: Vec<PathBuf>,
}

/// Run the generate command.
pub fn run_generate(config: &ConfigLoader, args: &GenerateArgs) -> Result<GenerateReport> {
    let mut settings =
        GeneratorSettings::from_config(config).context("Invalid generator configuration")?;
    args.apply(&mut settings);

    let mut generator = DatasetGenerator::new(settings)?;
    let dataset = generator.generate();

    let dir = match args.output_dir {
        Some(ref dir) => dir.clone(),
        None => raw_dir(config)?,
    };
    let files = OutputFiles::from_config(config)?;
    let writer = CsvWriter::new(dir).with_gzip(args.gzip);

    info!(dir = %writer.dir().display(), "Saving data to files");
    let files = writer.write_dataset(&dataset, &files)?;

    Ok(GenerateReport { dataset, files })
}

/// Human-readable summary with a preview of the first rows.
pub fn format_report(report: &GenerateReport, preview: usize) -> String {
    let mut out = String::new();

    out.push_str("DATA SUMMARY:\n");
    out.push_str(&report.dataset.summary().to_string());
    out.push_str("\n\nFiles:\n");
    for path in &report.files {
        out.push_str(&format!("  {}\n", path.display()));
    }

    if preview > 0 {
        let customers = &report.dataset.customers;
        let transactions = &report.dataset.transactions;
        out.push_str(&format!("\nSAMPLE DATA (first {} rows):\n", preview));
        out.push_str("Customers:\n");
        out.push_str(&to_csv_string(&customers[..preview.min(customers.len())]));
        out.push_str("\nTransactions:\n");
        out.push_str(&to_csv_string(&transactions[..preview.min(transactions.len())]));
    }

    out
}
