//! Line-oriented script commands.
//!
//! One command per line; blank lines and `#` comments are skipped.

use std::str::FromStr;
use std::time::Duration;

use weft_common::{ConfigError, Direction, Point, Size};
use weft_config::LayoutKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a window and hand it to the tiler.
    Add { name: String, min_size: Size },
    /// Close a window, telling the tiler first.
    Remove { name: String },
    /// Close a window behind the tiler's back.
    Close { name: String },
    Focus { name: String },
    /// Move `name` next to the window `target`.
    Put {
        name: String,
        target: String,
        direction: Direction,
    },
    /// Drag-and-drop `name` at a screen point.
    Drop { name: String, point: Point },
    Resize {
        name: String,
        direction: Direction,
        amount: f64,
    },
    /// Drag the trailing edge of `name`'s tile on the host, as a user would.
    Drag { name: String, delta: f64 },
    /// Let script time pass so pending host edits can settle.
    Wait(Duration),
    Layout(LayoutKind),
    Cycle,
    Show,
}

/// Parse a whole script, reporting the first bad line by number.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ConfigError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(e) => {
                return Err(ConfigError::ParseError(format!("line {}: {e}", idx + 1)));
            }
        }
    }
    Ok(commands)
}

/// Parse one line. `Ok(None)` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ConfigError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let (verb, rest) = (words[0], &words[1..]);
    let cmd = match (verb, rest) {
        ("add", [name]) => Command::Add {
            name: name.to_string(),
            min_size: Size::default(),
        },
        ("add", [name, w, h]) => Command::Add {
            name: name.to_string(),
            min_size: Size::new(number(w)?, number(h)?),
        },
        ("remove", [name]) => Command::Remove {
            name: name.to_string(),
        },
        ("close", [name]) => Command::Close {
            name: name.to_string(),
        },
        ("focus", [name]) => Command::Focus {
            name: name.to_string(),
        },
        ("put", [name, target, dir]) => Command::Put {
            name: name.to_string(),
            target: target.to_string(),
            direction: Direction::from_str(dir)?,
        },
        ("drop", [name, x, y]) => Command::Drop {
            name: name.to_string(),
            point: Point::new(number(x)?, number(y)?),
        },
        ("resize", [name, dir, amount]) => Command::Resize {
            name: name.to_string(),
            direction: Direction::from_str(dir)?,
            amount: number(amount)?,
        },
        ("drag", [name, delta]) => Command::Drag {
            name: name.to_string(),
            delta: number(delta)?,
        },
        ("wait", [ms]) => {
            let ms: u64 = ms
                .parse()
                .map_err(|e| ConfigError::ParseError(format!("'{ms}' is not a millisecond count: {e}")))?;
            Command::Wait(Duration::from_millis(ms))
        }
        ("layout", [kind]) => Command::Layout(LayoutKind::from_str(kind)?),
        ("cycle", []) => Command::Cycle,
        ("show", []) => Command::Show,
        _ => {
            return Err(ConfigError::ParseError(format!(
                "unrecognised command '{line}'"
            )))
        }
    };
    Ok(Some(cmd))
}

fn number(word: &str) -> Result<f64, ConfigError> {
    let value: f64 = word
        .parse()
        .map_err(|e| ConfigError::ParseError(format!("'{word}' is not a number: {e}")))?;
    if !value.is_finite() {
        return Err(ConfigError::ParseError(format!("'{word}' is not finite")));
    }
    Ok(value)
}
