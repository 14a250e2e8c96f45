//! Command line for churn-synth.
//!
//! Global flags choose the config file, strictness and logging. With no
//! subcommand the binary generates the datasets.

pub mod generate;
pub mod get;
pub mod init;
pub mod show;

use crate::config::LoadOptions;
use clap::{Parser, Subcommand};
use generate::GenerateArgs;
use get::GetArgs;
use init::InitArgs;
use show::ShowArgs;
use std::path::PathBuf;

/// Synthetic customer-churn dataset generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: search config/config.yaml, config.yaml, ../config/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail if no configuration file is found instead of using built-in defaults
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Build loader options from the global flags.
    ///
    /// Lenient unless `--strict` is given, so a fresh checkout can generate
    /// data without a config file.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::lenient()
            .with_strict(self.strict)
            .with_optional_path(self.config.clone())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the synthetic datasets (default if no subcommand given)
    Generate(GenerateArgs),

    /// Write the default configuration template
    Init(InitArgs),

    /// Print one configuration value by dot-separated key
    Get(GetArgs),

    /// Print the whole loaded configuration
    Show(ShowArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let cli = Cli::parse_from(["churn-synth"]);
        let options = cli.load_options();
        assert!(!options.strict);
        assert!(options.path.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["churn-synth", "get", "data.raw_dir", "--strict", "-c", "x.yaml"]);
        let options = cli.load_options();
        assert!(options.strict);
        assert_eq!(options.path, Some(PathBuf::from("x.yaml")));
        assert!(matches!(cli.command, Some(Command::Get(_))));
    }
}
