use std::path::PathBuf;

use clap::Parser;
use weft_config::{InsertionPoint, LayoutKind};

/// weft: run a tiling script against an in-memory desktop and print where
/// every window ends up.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about)]
pub struct Args {
    /// Script to run. Reads stdin when omitted.
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Layout for the desktop (btree, half, three-column, monocle, passthrough).
    #[arg(short, long)]
    pub layout: Option<LayoutKind>,

    /// Where new windows go (left, right, active).
    #[arg(short, long)]
    pub insertion: Option<InsertionPoint>,

    /// Rotate the layout so columns become rows.
    #[arg(long)]
    pub rotate: bool,

    /// Screen width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    pub width: f64,

    /// Screen height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    pub height: f64,

    /// Settings file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_full_hd() {
        let args = Args::try_parse_from(["weft"]).unwrap();
        assert_eq!(args.width, 1920.0);
        assert_eq!(args.height, 1080.0);
        assert!(args.layout.is_none());
        assert!(!args.rotate);
    }

    #[test]
    fn parses_layout_names() {
        let args =
            Args::try_parse_from(["weft", "--layout", "three-column", "--insertion", "right"])
                .unwrap();
        assert_eq!(args.layout, Some(LayoutKind::ThreeColumn));
        assert_eq!(args.insertion, Some(InsertionPoint::Right));
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(Args::try_parse_from(["weft", "--layout", "spiral"]).is_err());
    }
}
