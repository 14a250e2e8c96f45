//! churn-synth
//!
//! Generates synthetic customer-churn datasets from a YAML configuration.

use anyhow::Result;
use churn_synth::cli::generate::{GenerateArgs, format_report, run_generate};
use churn_synth::cli::get::run_get;
use churn_synth::cli::init::run_init;
use churn_synth::cli::show::run_show;
use churn_synth::cli::{Cli, Command};
use churn_synth::config::{ConfigLoader, LoadOptions};
use churn_synth::logging::{LogTarget, init_logging};
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    // One loader per run, passed by reference to the command that needs it.
    let options = cli.load_options();

    match cli.command {
        Some(Command::Init(args)) => {
            println!("{}", run_init(&args)?);
        }
        Some(Command::Get(args)) => {
            let config = load_config(options)?;
            println!("{}", run_get(&config, &args)?);
        }
        Some(Command::Show(args)) => {
            let config = load_config(options)?;
            print!("{}", run_show(&config, &args)?);
        }
        Some(Command::Generate(args)) => {
            let config = load_config(options)?;
            generate(&config, &args)?;
        }
        None => {
            let config = load_config(options)?;
            let args = GenerateArgs {
                preview: 3,
                ..Default::default()
            };
            generate(&config, &args)?;
        }
    }

    Ok(())
}

fn load_config(options: LoadOptions) -> Result<ConfigLoader> {
    let config = ConfigLoader::load_with(options)?;
    info!(source = %config.source(), strict = config.is_strict(), "Configuration ready");
    Ok(config)
}

fn generate(config: &ConfigLoader, args: &GenerateArgs) -> Result<()> {
    let report = run_generate(config, args)?;
    println!("DATA GENERATION COMPLETED");
    println!();
    print!("{}", format_report(&report, args.preview));
    Ok(())
}
