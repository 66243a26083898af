//! Per-desktop engine configurations as a flat JSON document.
//!
//! The document maps the canonical desktop-key string to an
//! [`EngineConfig`] record. Persisting it is left to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weft_common::ConfigError;

use crate::schema::EngineConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesktopConfigs(BTreeMap<String, EngineConfig>);

impl DesktopConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, desktop: impl Into<String>, config: EngineConfig) {
        self.0.insert(desktop.into(), config);
    }

    pub fn get(&self, desktop: &str) -> Option<&EngineConfig> {
        self.0.get(desktop)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EngineConfig)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self)
            .map_err(|e| ConfigError::ParseError(format!("failed to serialize desktop configs: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse desktop configs: {e}")))
    }
}
