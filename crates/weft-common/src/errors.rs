use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Lookup failures between the engine's abstract tree and the host's tree.
///
/// These indicate a host/engine desync. Callers at the host boundary log
/// them and fall back to a safe default; they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TilingError {
    #[error("abstract tile {0} has no host counterpart")]
    TileNotMapped(String),

    #[error("host tile {0} has no abstract counterpart")]
    HostTileNotMapped(String),

    #[error("client {0} has no host window")]
    ClientNotMapped(String),

    #[error("host window {0} is not registered")]
    WindowNotMapped(String),

    #[error("tile {0} is not part of the engine's layout")]
    TileNotInLayout(String),

    #[error("host produced {actual} children, expected {expected}")]
    SplitMismatch { expected: usize, actual: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum WeftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tiling(#[from] TilingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
