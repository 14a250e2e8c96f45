//! Built-in default configuration template.
//!
//! The template is embedded at build time from `config/default.yaml` and is
//! used both as the lenient-mode fallback and as the first-run bootstrap file.

use super::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Raw YAML of the built-in default document.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../config/default.yaml");

/// Where `init` writes the template when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Locations searched, in order, when no explicit path is given.
pub const DEFAULT_CANDIDATES: [&str; 3] = [
    "config/config.yaml",
    "config.yaml",
    "../config/config.yaml",
];

/// Candidate locations as owned paths.
pub fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Materialize the built-in default document.
pub fn default_document() -> ConfigResult<ConfigDocument> {
    ConfigDocument::parse(DEFAULT_CONFIG_YAML, Path::new("<built-in defaults>"))
}

/// Write the built-in default document to `path` as block-style YAML.
///
/// Parent directories are created and an existing file is overwritten.
pub fn save_default_config(path: impl AsRef<Path>) -> ConfigResult<()> {
    let path = path.as_ref();
    let yaml = default_document()?.to_yaml_string()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    std::fs::write(path, yaml).map_err(|e| ConfigError::io(path, e))?;

    info!(path = %path.display(), "Saved default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use tempfile::TempDir;

    #[test]
    fn test_default_candidates_in_search_order() {
        let expected = vec![
            PathBuf::from("config/config.yaml"),
            PathBuf::from("config.yaml"),
            PathBuf::from("../config/config.yaml"),
        ];
        assert_eq!(default_candidates(), expected);
        assert_eq!(crate::config::LoadOptions::strict().candidates, expected);
        assert_eq!(crate::config::LoadOptions::lenient().candidates, expected);
    }

    #[test]
    fn test_default_document_schema() {
        let doc = default_document().unwrap();
        assert_eq!(
            doc.get("project.name").unwrap(),
            &Value::from("customer-churn-predictor")
        );
        assert_eq!(doc.get("project.version").unwrap(), &Value::from("1.0.0"));
        assert_eq!(doc.get_as::<u64>("data.num_customers").unwrap(), 1000);
        assert_eq!(doc.get_as::<String>("data.start_date").unwrap(), "2022-01-01");
        assert_eq!(doc.get_as::<u64>("random.seed").unwrap(), 42);
        assert_eq!(
            doc.get_as::<Vec<String>>("synthetic_data.customers.regions")
                .unwrap()
                .len(),
            4
        );
        assert_eq!(
            doc.get_as::<f64>("synthetic_data.customers.contract_types.Monthly.probability")
                .unwrap(),
            0.6
        );
    }

    #[test]
    fn test_income_segments_sum_to_one() {
        let doc = default_document().unwrap();
        let segments = doc.section("synthetic_data.customers.income_segments").unwrap();
        let total: f64 = segments
            .as_mapping()
            .values()
            .filter_map(Value::as_f64)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config").join("config.yaml");

        save_default_config(&path).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "stale: true\n").unwrap();
        save_default_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("customer-churn-predictor"));
    }
}
