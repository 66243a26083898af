//! weft configuration.
//!
//! Per-desktop [`EngineConfig`] records, the global [`TilingSettings`]
//! file, and the JSON document that stores one record per desktop.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use weft_config::load_settings;
//!
//! let settings = load_settings().expect("failed to load settings");
//! println!("{}", settings.default_engine_config().layout_kind);
//! ```

pub mod schema;
pub mod store;
pub mod toml_loader;
pub mod validation;

pub use schema::{EngineConfig, InsertionPoint, LayoutKind, TilingSettings, CONFIG_SCHEMA_VERSION};
pub use store::DesktopConfigs;

use weft_common::ConfigError;

/// Load settings from the platform default path.
///
/// Out-of-range values are logged and kept; only an unreadable or
/// unparsable file is an error.
pub fn load_settings() -> Result<TilingSettings, ConfigError> {
    toml_loader::load_default()
}
