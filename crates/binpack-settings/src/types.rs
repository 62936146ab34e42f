//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a partial
//! JSON document is valid and missing fields take their compiled default.

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "packer": { "capacity": 4096 },
///   "logging": { "level": "info", "logEvents": true }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinpackSettings {
    /// Settings schema version.
    pub version: String,
    /// Packing parameters.
    pub packer: PackerSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for BinpackSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            packer: PackerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Packing parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackerSettings {
    /// Capacity shared by every bin. Must be at least 1.
    pub capacity: usize,
}

impl Default for PackerSettings {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Attach a logging listener to packers built from these settings.
    pub log_events: bool,
    /// Name the logging listener reports under.
    pub listener_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_events: false,
            listener_name: "binpack".to_string(),
        }
    }
}
