//! # binpack-settings
//!
//! Layered configuration for the bin packer.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`BinpackSettings::default()`]
//! 2. **User file**: `~/.binpack/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `BINPACK_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use binpack_settings::{build_packer, get_settings};
//!
//! let settings = get_settings();
//! binpack_core::logging::init_subscriber(&settings.logging.level);
//! let mut packer = build_packer::<String>(settings)?;
//! # Ok::<(), binpack_core::PackError>(())
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::{Arc, OnceLock};

use binpack_core::{BinPacker, LoggingListener};

/// Global settings singleton.
static SETTINGS: OnceLock<BinpackSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.binpack/settings.json` with env var
/// overrides. On subsequent calls, returns the cached value. If loading
/// fails, logs the failure and returns compiled defaults.
pub fn get_settings() -> &'static BinpackSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to load settings, using defaults");
            BinpackSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// Returns the settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: BinpackSettings) -> std::result::Result<(), BinpackSettings> {
    SETTINGS.set(settings)
}

/// Build a packer from settings.
///
/// Registers a [`LoggingListener`] named `logging.listenerName` when
/// `logging.logEvents` is set.
pub fn build_packer<T>(settings: &BinpackSettings) -> binpack_core::Result<BinPacker<T>> {
    let mut packer = BinPacker::new(settings.packer.capacity)?;
    if settings.logging.log_events {
        let _ = packer.listeners().register(Arc::new(LoggingListener::new(
            settings.logging.listener_name.clone(),
        )));
    }
    tracing::debug!(
        capacity = settings.packer.capacity,
        log_events = settings.logging.log_events,
        "built packer from settings"
    );
    Ok(packer)
}
