//! In-memory configuration document with dot-notation lookups.
//!
//! A document is a YAML mapping whose values are scalars, sequences or
//! nested mappings. Keys such as `data.num_customers` walk the tree one
//! segment at a time and only ever descend through mappings.

use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parsed configuration tree. The root is always a mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Mapping,
}

impl ConfigDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping.
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse YAML text into a document.
    ///
    /// `origin` is only used for error reporting. An empty document is
    /// treated as an empty mapping; any other non-mapping root is rejected.
    pub fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(ConfigError::InvalidDocument {
                path: origin.to_path_buf(),
                found: value_kind(&other),
            }),
        }
    }

    /// Borrow the root mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Clone the root into a plain YAML value.
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.root.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk a dot-separated key through nested mappings.
    ///
    /// Returns `None` if a segment is missing or if a non-mapping value is
    /// reached before the key is exhausted.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut value = self.root.get(first)?;
        for segment in segments {
            value = value.as_mapping()?.get(segment)?;
        }
        Some(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Look up a key that must exist.
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        self.lookup(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    /// Look up a key, substituting `default` on a miss.
    ///
    /// The default is returned as given, including falsy values and `null`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Look up a key that must exist and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        let value = self.get(key)?;
        convert(key, value)
    }

    /// Deserialize the value at `key` into `T`, or return `default` on a miss.
    ///
    /// A present value of the wrong shape is an error, not a miss.
    pub fn get_as_or<T: DeserializeOwned>(&self, key: &str, default: T) -> ConfigResult<T> {
        match self.lookup(key) {
            Some(value) => convert(key, value),
            None => Ok(default),
        }
    }

    /// Return the submapping at `key` as its own document.
    pub fn section(&self, key: &str) -> ConfigResult<ConfigDocument> {
        let value = self.get(key)?;
        match value.as_mapping() {
            Some(mapping) => Ok(Self::from_mapping(mapping.clone())),
            None => Err(ConfigError::invalid_value(
                key,
                format!("expected a mapping, found {}", value_kind(value)),
            )),
        }
    }

    /// Serialize as block-style YAML.
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        serde_yaml::to_string(&self.root).map_err(ConfigError::Serialize)
    }
}

fn convert<T: DeserializeOwned>(key: &str, value: &Value) -> ConfigResult<T> {
    serde_yaml::from_value(value.clone())
        .map_err(|e| ConfigError::invalid_value(key, e.to_string()))
}

/// Human-readable name of a YAML value's kind.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
