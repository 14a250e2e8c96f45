//! Structured error types for configuration loading and lookup.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the configuration accessor.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file at the hinted path or any candidate location (strict mode).
    #[error("configuration file not found (searched: {})", DisplayPaths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The file exists but is not valid YAML.
    #[error("failed to parse configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file exists but could not be read or written.
    #[error("failed to access configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document parsed, but its root is not a mapping.
    ///
    /// This is the structural counterpart of `Parse`: callers treating
    /// malformed files as one case should match both.
    #[error("configuration root in {} must be a mapping, found {found}", .path.display())]
    InvalidDocument { path: PathBuf, found: &'static str },

    /// A dot-path lookup missed and no default was supplied.
    #[error("configuration key '{0}' not found")]
    KeyNotFound(String),

    /// A value exists but has the wrong shape for the caller.
    #[error("invalid value for configuration key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// The document could not be serialized back to YAML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl ConfigError {
    pub fn invalid_value(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the lookup-miss variant.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, ConfigError::KeyNotFound(_))
    }
}

struct DisplayPaths<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no candidates");
        }
        let joined: Vec<String> = self.0.iter().map(|p| p.display().to_string()).collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
