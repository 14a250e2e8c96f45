//! Show command: print the whole loaded configuration.

use crate::config::ConfigLoader;
use anyhow::Result;
use clap::{Args, ValueEnum};

/// Output format for the show command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Yaml)]
    pub format: ShowFormat,
}

/// Run the show command.
pub fn run_show(config: &ConfigLoader, args: &ShowArgs) -> Result<String> {
    match args.format {
        ShowFormat::Yaml => Ok(format!(
            "# source: {}\n{}",
            config.source(),
            config.document().to_yaml_string()?
        )),
        ShowFormat::Json => {
            let json = serde_json::to_value(config.document().to_value())?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&json)?))
        }
    }
}
