pub mod errors;
pub mod types;

pub use errors::{ConfigError, TilingError, WeftError};
pub use types::{ClientId, DesktopKey, Direction, Point, Rect, Size};

pub type Result<T> = std::result::Result<T, WeftError>;
