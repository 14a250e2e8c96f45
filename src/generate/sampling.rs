//! Weighted categorical sampling driven by configuration tables.

use crate::config::{ConfigLoader, value_kind};
use crate::error::{ConfigError, ConfigResult};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde_yaml::Value;

/// Allowed drift of a probability table's total from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 0.01;

/// Named categories with sampling weights.
#[derive(Debug, Clone)]
pub struct WeightedTable {
    names: Vec<String>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl WeightedTable {
    /// Build a table whose probabilities must sum to 1 (within tolerance).
    pub fn new(key: &str, entries: Vec<(String, f64)>) -> ConfigResult<Self> {
        validate_probabilities(key, &entries)?;
        let (names, weights): (Vec<String>, Vec<f64>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| ConfigError::invalid_value(key, e.to_string()))?;
        Ok(Self {
            names,
            weights,
            index,
        })
    }

    /// Read a `name -> probability` mapping, or a `name -> {field: probability}`
    /// mapping when `field` is given. Missing keys use `default`.
    pub fn from_config(
        config: &ConfigLoader,
        key: &str,
        field: Option<&str>,
        default: &[(&str, f64)],
    ) -> ConfigResult<Self> {
        let Some(value) = config.lookup(key) else {
            let entries = default
                .iter()
                .map(|(name, p)| (name.to_string(), *p))
                .collect();
            return Self::new(key, entries);
        };

        let mapping = value.as_mapping().ok_or_else(|| {
            ConfigError::invalid_value(
                key,
                format!("expected a mapping, found {}", value_kind(value)),
            )
        })?;

        let mut entries = Vec::with_capacity(mapping.len());
        for (name, entry) in mapping {
            let name = category_name(name)
                .ok_or_else(|| ConfigError::invalid_value(key, "category names must be scalars"))?;
            let weight = match field {
                Some(field) => entry.get(field),
                None => Some(entry),
            }
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ConfigError::invalid_value(key, format!("'{name}' has no numeric probability"))
            })?;
            entries.push((name, weight));
        }

        Self::new(key, entries)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Draw one category name.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.names[self.index.sample(rng)]
    }
}

fn category_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reject empty tables, negative weights and totals away from 1.
pub fn validate_probabilities(key: &str, entries: &[(String, f64)]) -> ConfigResult<()> {
    if entries.is_empty() {
        return Err(ConfigError::invalid_value(key, "probability table is empty"));
    }
    if let Some((name, p)) = entries.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
        return Err(ConfigError::invalid_value(
            key,
            format!("probability for '{name}' must be a non-negative number, got {p}"),
        ));
    }

    let total: f64 = entries.iter().map(|(_, p)| p).sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(ConfigError::invalid_value(
            key,
            format!("probabilities must sum to 1.0, got {total}"),
        ));
    }
    Ok(())
}
