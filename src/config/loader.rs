//! Configuration loader with strict and lenient discovery.
//!
//! Resolves a config file from an explicit path or the candidate list,
//! parses it, and falls back to the built-in defaults only in lenient mode.

use super::defaults::{default_candidates, default_document, save_default_config};
use super::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Where the loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from a file on disk
    File(PathBuf),
    /// Built-in defaults (lenient fallback)
    BuiltIn,
    /// Handed to the loader directly
    Memory,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::BuiltIn => write!(f, "built-in defaults"),
            ConfigSource::Memory => write!(f, "in-memory document"),
        }
    }
}

/// Options controlling how a [`ConfigLoader`] finds its document.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit config file. Takes precedence over the candidate list.
    pub path: Option<PathBuf>,
    /// Fail with `NotFound` instead of falling back to defaults.
    pub strict: bool,
    /// Locations searched in order when `path` is unset.
    pub candidates: Vec<PathBuf>,
    /// Root that `get_path` joins onto.
    pub base_dir: PathBuf,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl LoadOptions {
    /// Library policy: a missing file is an error.
    pub fn strict() -> Self {
        Self {
            path: None,
            strict: true,
            candidates: default_candidates(),
            base_dir: install_root(),
        }
    }

    /// Script policy: a missing file falls back to the built-in defaults.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::strict()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_optional_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Pick the file to load, returning it (if any) and every path checked.
    fn resolve(&self) -> (Option<PathBuf>, Vec<PathBuf>) {
        if let Some(ref path) = self.path {
            let found = path.is_file().then(|| path.clone());
            return (found, vec![path.clone()]);
        }

        let found = self.candidates.iter().find(|p| p.is_file()).cloned();
        (found, self.candidates.clone())
    }
}

/// Installation root of the crate, fixed at build time.
fn install_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Hierarchical configuration accessor.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    options: LoadOptions,
    document: ConfigDocument,
    source: ConfigSource,
}

impl ConfigLoader {
    /// Load with the strict library policy.
    ///
    /// With `path` unset the default candidate locations are searched.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let options = LoadOptions::strict().with_optional_path(path.map(Path::to_path_buf));
        Self::load_with(options)
    }

    /// Load with explicit options.
    pub fn load_with(options: LoadOptions) -> ConfigResult<Self> {
        let (document, source) = Self::load_document(&options)?;
        Ok(Self {
            options,
            document,
            source,
        })
    }

    /// Wrap an already-built document.
    pub fn from_document(document: ConfigDocument, options: LoadOptions) -> Self {
        Self {
            options,
            document,
            source: ConfigSource::Memory,
        }
    }

    fn load_document(options: &LoadOptions) -> ConfigResult<(ConfigDocument, ConfigSource)> {
        let (found, searched) = options.resolve();

        match found {
            Some(path) => {
                let document = Self::read_document(&path)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok((document, ConfigSource::File(path)))
            }
            None if options.strict => Err(ConfigError::NotFound { searched }),
            None => {
                warn!(
                    searched = ?searched,
                    "Configuration file not found, using default configuration"
                );
                Ok((default_document()?, ConfigSource::BuiltIn))
            }
        }
    }

    fn read_document(path: &Path) -> ConfigResult<ConfigDocument> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Error loading config file");
            ConfigError::io(path, e)
        })?;

        ConfigDocument::parse(&content, path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Error parsing YAML file");
        })
    }

    /// Re-run discovery and replace the whole document.
    pub fn reload(&mut self) -> ConfigResult<()> {
        let (document, source) = Self::load_document(&self.options)?;
        debug!(source = %source, "Configuration reloaded");
        self.document = document;
        self.source = source;
        Ok(())
    }

    /// Get the loaded document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Path of the file that was loaded, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self.source {
            ConfigSource::File(ref path) => Some(path.as_path()),
            ConfigSource::BuiltIn | ConfigSource::Memory => None,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.document.lookup(key)
    }

    /// Value at a dot-separated key; `KeyNotFound` on a miss.
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        self.document.get(key)
    }

    /// Value at a dot-separated key, or `default` on a miss.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.document.get_or(key, default)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        self.document.get_as(key)
    }

    pub fn get_as_or<T: DeserializeOwned>(&self, key: &str, default: T) -> ConfigResult<T> {
        self.document.get_as_or(key, default)
    }

    pub fn section(&self, key: &str) -> ConfigResult<ConfigDocument> {
        self.document.section(key)
    }

    /// Base directory used by [`ConfigLoader::get_path`].
    pub fn base_dir(&self) -> &Path {
        &self.options.base_dir
    }

    /// Join path segments onto the base directory. Does not touch the filesystem.
    pub fn get_path<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        segments
            .into_iter()
            .fold(self.options.base_dir.clone(), |acc, s| acc.join(s))
    }

    /// Write the built-in default template to `path`.
    pub fn save_default_config(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        save_default_config(path)
    }
}
