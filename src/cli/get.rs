//! Get command: print one value by dot-separated key.

use crate::config::ConfigLoader;
use anyhow::{Context, Result};
use clap::Args;
use serde_yaml::Value;

/// Arguments for the get command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dot-separated key, e.g. data.num_customers
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value to print when the key is missing (parsed as YAML)
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,
}

/// Resolve the value the get command prints.
pub fn resolve(config: &ConfigLoader, args: &GetArgs) -> Result<Value> {
    match args.default {
        Some(ref raw) => {
            let default: Value = serde_yaml::from_str(raw)
                .with_context(|| format!("Invalid default value '{}'", raw))?;
            Ok(config.get_or(&args.key, default))
        }
        None => Ok(config.get(&args.key)?.clone()),
    }
}

/// Render a value for the terminal: scalars bare, collections as YAML.
pub fn render(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)?.trim_end().to_string(),
    })
}

/// Run the get command.
pub fn run_get(config: &ConfigLoader, args: &GetArgs) -> Result<String> {
    let value = resolve(config, args)?;
    render(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDocument, LoadOptions};
    use crate::error::ConfigError;
    use std::path::Path;

    fn loader() -> ConfigLoader {
        let doc = ConfigDocument::parse(
            "data:\n  num_customers: 500\n  raw_dir: data/raw\nregions: [North, South]\n",
            Path::new("test.yaml"),
        )
        .unwrap();
        ConfigLoader::from_document(doc, LoadOptions::strict())
    }

    fn args(key: &str, default: Option<&str>) -> GetArgs {
        GetArgs {
            key: key.to_string(),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_get_scalar() {
        assert_eq!(run_get(&loader(), &args("data.num_customers", None)).unwrap(), "500");
        assert_eq!(run_get(&loader(), &args("data.raw_dir", None)).unwrap(), "data/raw");
    }

    #[test]
    fn test_get_sequence_as_yaml() {
        assert_eq!(
            run_get(&loader(), &args("regions", None)).unwrap(),
            "- North\n- South"
        );
    }

    #[test]
    fn test_get_missing_with_default() {
        assert_eq!(run_get(&loader(), &args("data.missing", Some("10"))).unwrap(), "10");
        assert_eq!(
            resolve(&loader(), &args("data.missing", Some("false"))).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_get_missing_without_default() {
        let err = run_get(&loader(), &args("other.missing", None)).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(config_err.is_key_not_found());
    }
}
