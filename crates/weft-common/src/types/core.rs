use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Engine-side identity of a host window. Allocated by the driver that
/// registered the window; never reused within one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// Identity under which one driver+engine pair is cached: a screen, an
/// activity and a virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DesktopKey {
    pub screen: u32,
    pub activity: String,
    pub desktop: String,
}

impl DesktopKey {
    const SEPARATOR: char = '|';

    pub fn new(screen: u32, activity: impl Into<String>, desktop: impl Into<String>) -> Self {
        Self {
            screen,
            activity: activity.into(),
            desktop: desktop.into(),
        }
    }
}

impl fmt::Display for DesktopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.screen,
            self.activity,
            self.desktop,
            sep = Self::SEPARATOR
        )
    }
}

impl FromStr for DesktopKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, Self::SEPARATOR);
        let (Some(screen), Some(activity), Some(desktop)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ConfigError::ParseError(format!(
                "desktop key '{s}' must have three '|'-separated parts"
            )));
        };
        let screen = screen
            .trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::ParseError(format!("desktop key '{s}': bad screen: {e}")))?;
        Ok(Self::new(screen, activity, desktop))
    }
}
