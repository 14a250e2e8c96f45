//! Init command: write the default configuration template.

use crate::config::{DEFAULT_CONFIG_PATH, save_default_config};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the init command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the template
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Outcome of the init command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Skipped(PathBuf),
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> Result<InitOutcome> {
    let existed = args.path.exists();
    if existed && !args.force {
        return Ok(InitOutcome::Skipped(args.path.clone()));
    }

    save_default_config(&args.path)?;

    Ok(if existed {
        InitOutcome::Overwritten(args.path.clone())
    } else {
        InitOutcome::Created(args.path.clone())
    })
}

impl std::fmt::Display for InitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitOutcome::Created(p) => write!(f, "Created default config at: {}", p.display()),
            InitOutcome::Overwritten(p) => {
                write!(f, "Overwrote config with defaults at: {}", p.display())
            }
            InitOutcome::Skipped(p) => write!(
                f,
                "Config already exists at: {} (use --force to overwrite)",
                p.display()
            ),
        }
    }
}
