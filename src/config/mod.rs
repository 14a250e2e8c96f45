//! Hierarchical YAML configuration.
//!
//! A [`ConfigLoader`] owns one [`ConfigDocument`] loaded from:
//! 1. **Explicit path** - passed by the caller (`--config` on the CLI)
//! 2. **Candidates** - `config/config.yaml`, `config.yaml`, `../config/config.yaml`
//! 3. **Built-in defaults** - embedded from `./config/default.yaml`, lenient mode only
//!
//! ## Strictness
//! - Strict (library default): no file found is `ConfigError::NotFound`
//! - Lenient (data generation): no file found falls back to the defaults
//!
//! Parse errors are always returned, whatever the mode.
//!
//! ## Keys
//! Lookups take dot-separated keys such as `synthetic_data.customers.age.mean`.

mod defaults;
mod document;
pub mod global;
mod loader;

pub use defaults::{
    DEFAULT_CANDIDATES, DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_YAML, default_candidates,
    default_document, save_default_config,
};
pub use document::{ConfigDocument, value_kind};
pub use loader::{ConfigLoader, ConfigSource, LoadOptions};
