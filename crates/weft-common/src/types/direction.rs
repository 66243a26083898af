//! Directional bitmask used for directed insertion and resizing.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::errors::ConfigError;

bitflags! {
    /// A screen direction. `UP` unset means down, `RIGHT` unset means left,
    /// and `VERTICAL` marks the vertical axis as the primary one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Direction: u8 {
        const UP       = 0b001;
        const RIGHT    = 0b010;
        const VERTICAL = 0b100;
    }
}

impl Direction {
    pub fn up() -> Self {
        Direction::UP | Direction::VERTICAL
    }

    pub fn down() -> Self {
        Direction::VERTICAL
    }

    pub fn left() -> Self {
        Direction::empty()
    }

    pub fn right() -> Self {
        Direction::RIGHT
    }

    pub fn is_vertical(self) -> bool {
        self.contains(Direction::VERTICAL)
    }

    /// Whether this direction points toward the start of its primary axis
    /// (up for vertical, left for horizontal).
    pub fn points_to_start(self) -> bool {
        if self.is_vertical() {
            self.contains(Direction::UP)
        } else {
            !self.contains(Direction::RIGHT)
        }
    }

    /// Swap the axes, mapping a screen direction into the frame of a layout
    /// whose orientation has been rotated (and back).
    pub fn transposed(self) -> Self {
        let mut out = Direction::empty();
        if !self.contains(Direction::RIGHT) {
            out |= Direction::UP;
        }
        if !self.contains(Direction::UP) {
            out |= Direction::RIGHT;
        }
        if !self.is_vertical() {
            out |= Direction::VERTICAL;
        }
        out
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.is_vertical(), self.points_to_start()) {
            (true, true) => "up",
            (true, false) => "down",
            (false, true) => "left",
            (false, false) => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::up()),
            "down" => Ok(Direction::down()),
            "left" => Ok(Direction::left()),
            "right" => Ok(Direction::right()),
            other => Err(ConfigError::ParseError(format!("unknown direction '{other}'"))),
        }
    }
}
