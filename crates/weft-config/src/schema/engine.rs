//! Per-desktop engine configuration: layout kind, insertion policy, rotation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use weft_common::ConfigError;

/// Accepts either the integer form used by persisted records or a
/// lowercase name, as written by hand in TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexOrName {
    Index(u8),
    Name(String),
}

/// Which tiling algorithm a desktop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "IndexOrName", into = "u8")]
pub enum LayoutKind {
    #[default]
    BTree,
    Half,
    ThreeColumn,
    Monocle,
    Passthrough,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 5] = [
        LayoutKind::BTree,
        LayoutKind::Half,
        LayoutKind::ThreeColumn,
        LayoutKind::Monocle,
        LayoutKind::Passthrough,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::BTree => "btree",
            LayoutKind::Half => "half",
            LayoutKind::ThreeColumn => "three-column",
            LayoutKind::Monocle => "monocle",
            LayoutKind::Passthrough => "passthrough",
        }
    }

    /// The next kind in cycling order, wrapping around.
    pub fn next(self) -> Self {
        let idx = u8::from(self) as usize;
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl From<LayoutKind> for u8 {
    fn from(kind: LayoutKind) -> u8 {
        match kind {
            LayoutKind::BTree => 0,
            LayoutKind::Half => 1,
            LayoutKind::ThreeColumn => 2,
            LayoutKind::Monocle => 3,
            LayoutKind::Passthrough => 4,
        }
    }
}

impl TryFrom<u8> for LayoutKind {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConfigError::ValidationError(format!("unknown layout kind {value}")))
    }
}

impl TryFrom<IndexOrName> for LayoutKind {
    type Error = ConfigError;

    fn try_from(value: IndexOrName) -> Result<Self, Self::Error> {
        match value {
            IndexOrName::Index(i) => Self::try_from(i),
            IndexOrName::Name(n) => n.parse(),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ConfigError::ParseError(format!("unknown layout kind '{s}'")))
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a newly added client lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "IndexOrName", into = "u8")]
pub enum InsertionPoint {
    #[default]
    Left,
    Right,
    /// Next to the most recently focused client.
    Active,
}

impl InsertionPoint {
    pub const ALL: [InsertionPoint; 3] = [
        InsertionPoint::Left,
        InsertionPoint::Right,
        InsertionPoint::Active,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InsertionPoint::Left => "left",
            InsertionPoint::Right => "right",
            InsertionPoint::Active => "active",
        }
    }
}

impl From<InsertionPoint> for u8 {
    fn from(point: InsertionPoint) -> u8 {
        match point {
            InsertionPoint::Left => 0,
            InsertionPoint::Right => 1,
            InsertionPoint::Active => 2,
        }
    }
}

impl TryFrom<u8> for InsertionPoint {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConfigError::ValidationError(format!("unknown insertion point {value}")))
    }
}

impl TryFrom<IndexOrName> for InsertionPoint {
    type Error = ConfigError;

    fn try_from(value: IndexOrName) -> Result<Self, Self::Error> {
        match value {
            IndexOrName::Index(i) => Self::try_from(i),
            IndexOrName::Name(n) => n.parse(),
        }
    }
}

impl FromStr for InsertionPoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::ParseError(format!("unknown insertion point '{s}'")))
    }
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The flat record attached to one engine instance.
///
/// Built once per desktop and replaced wholesale on a settings change.
/// Serializes as `{"layoutKind": int, "insertionPoint": int, "rotateLayout": bool}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub layout_kind: LayoutKind,
    pub insertion_point: InsertionPoint,
    pub rotate_layout: bool,
}

impl EngineConfig {
    pub fn new(layout_kind: LayoutKind) -> Self {
        Self {
            layout_kind,
            ..Self::default()
        }
    }

    pub fn with_insertion_point(mut self, insertion_point: InsertionPoint) -> Self {
        self.insertion_point = insertion_point;
        self
    }

    pub fn with_rotation(mut self, rotate_layout: bool) -> Self {
        self.rotate_layout = rotate_layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.layout_kind, LayoutKind::BTree);
        assert_eq!(config.insertion_point, InsertionPoint::Left);
        assert!(!config.rotate_layout);
    }

    #[test]
    fn engine_config_serializes_as_flat_record() {
        let config = EngineConfig::new(LayoutKind::ThreeColumn)
            .with_insertion_point(InsertionPoint::Active)
            .with_rotation(true);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"layoutKind":2,"insertionPoint":2,"rotateLayout":true}"#
        );
    }

    #[test]
    fn engine_config_accepts_names_and_partial_records() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"layoutKind":"monocle","insertionPoint":"right"}"#).unwrap();
        assert_eq!(config.layout_kind, LayoutKind::Monocle);
        assert_eq!(config.insertion_point, InsertionPoint::Right);
        assert!(!config.rotate_layout);
    }

    #[test]
    fn out_of_range_kind_is_rejected() {
        let result: Result<EngineConfig, _> = serde_json::from_str(r#"{"layoutKind":9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn layout_kind_cycles_through_all() {
        let mut kind = LayoutKind::BTree;
        let mut seen = Vec::new();
        for _ in 0..LayoutKind::ALL.len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, LayoutKind::BTree);
        assert_eq!(seen, LayoutKind::ALL.to_vec());
    }

    #[test]
    fn names_parse_back() {
        for kind in LayoutKind::ALL {
            assert_eq!(kind.name().parse::<LayoutKind>().unwrap(), kind);
        }
        for point in InsertionPoint::ALL {
            assert_eq!(point.to_string().parse::<InsertionPoint>().unwrap(), point);
        }
        assert!("spiral".parse::<LayoutKind>().is_err());
    }
}
