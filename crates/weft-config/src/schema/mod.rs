//! Configuration schema types for weft.
//!
//! All structs use `serde(default)` so partial settings files work.

mod engine;

pub use engine::*;

use serde::{Deserialize, Serialize};

/// Current settings schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Global tiling settings. Supplies the engine configuration every desktop
/// starts from, plus the knobs the host-facing collaborators read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingSettings {
    /// Layout used by a desktop the first time it is touched.
    pub default_layout: LayoutKind,
    /// Insertion policy for new desktops.
    pub insertion_point: InsertionPoint,
    /// Rotate layouts on new desktops (columns become rows).
    pub rotate_layout: bool,
    /// Fraction of the screen one resize step moves a divider (valid range: 0.01-0.5).
    pub resize_amount: f64,
    /// Debounce window for host-driven tile edits, in ms (valid range: 0-2000).
    pub settle_delay_ms: u64,
}

impl Default for TilingSettings {
    fn default() -> Self {
        Self {
            default_layout: LayoutKind::BTree,
            insertion_point: InsertionPoint::Left,
            rotate_layout: false,
            resize_amount: 0.05,
            settle_delay_ms: 50,
        }
    }
}

impl TilingSettings {
    /// The engine configuration a freshly touched desktop gets.
    pub fn default_engine_config(&self) -> EngineConfig {
        EngineConfig {
            layout_kind: self.default_layout,
            insertion_point: self.insertion_point,
            rotate_layout: self.rotate_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = TilingSettings::default();
        assert_eq!(settings.default_layout, LayoutKind::BTree);
        assert_eq!(settings.insertion_point, InsertionPoint::Left);
        assert!(!settings.rotate_layout);
        assert!((settings.resize_amount - 0.05).abs() < f64::EPSILON);
        assert_eq!(settings.settle_delay_ms, 50);
    }

    #[test]
    fn settings_partial_toml() {
        let toml_str = r#"
default_layout = "three-column"
rotate_layout = true
"#;
        let settings: TilingSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.default_layout, LayoutKind::ThreeColumn);
        assert!(settings.rotate_layout);
        // Defaults preserved
        assert_eq!(settings.insertion_point, InsertionPoint::Left);
        assert_eq!(settings.settle_delay_ms, 50);
    }

    #[test]
    fn settings_accept_integer_kinds() {
        let settings: TilingSettings = toml::from_str("default_layout = 1\ninsertion_point = 2").unwrap();
        assert_eq!(settings.default_layout, LayoutKind::Half);
        assert_eq!(settings.insertion_point, InsertionPoint::Active);
    }

    #[test]
    fn default_engine_config_follows_settings() {
        let settings = TilingSettings {
            default_layout: LayoutKind::Monocle,
            insertion_point: InsertionPoint::Right,
            rotate_layout: true,
            ..TilingSettings::default()
        };
        let config = settings.default_engine_config();
        assert_eq!(config.layout_kind, LayoutKind::Monocle);
        assert_eq!(config.insertion_point, InsertionPoint::Right);
        assert!(config.rotate_layout);
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
