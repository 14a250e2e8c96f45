//! Opt-in process-wide configuration accessor.
//!
//! Prefer building one [`ConfigLoader`] at startup and passing it by
//! reference. This module exists for short-lived scripts that want a single
//! shared instance: the first successful call decides the configuration for
//! the rest of the process, and there is no reset.

use super::loader::{ConfigLoader, LoadOptions};
use crate::error::ConfigResult;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL_CONFIG: OnceLock<ConfigLoader> = OnceLock::new();

/// Return the global loader, loading it with `options` on first use.
///
/// Later calls ignore their `options`. A failed first load leaves the
/// global unset so a later call may try again.
pub fn get_or_init(options: LoadOptions) -> ConfigResult<&'static ConfigLoader> {
    if let Some(loader) = GLOBAL_CONFIG.get() {
        return Ok(loader);
    }

    let loader = ConfigLoader::load_with(options)?;
    debug!(source = %loader.source(), "Initialized global configuration");
    Ok(GLOBAL_CONFIG.get_or_init(|| loader))
}

/// The global loader, if it has been initialized.
pub fn get() -> Option<&'static ConfigLoader> {
    GLOBAL_CONFIG.get()
}
