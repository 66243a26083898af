mod cli;
mod script;
mod session;

use std::io::Read;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use weft_common::{Rect, WeftError};
use weft_config::TilingSettings;

use session::{PlacedWindow, Session};

fn load_settings(args: &cli::Args) -> TilingSettings {
    let loaded = match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            weft_config::toml_loader::load_from_path(path)
        }
        None => weft_config::load_settings(),
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Settings load failed, using defaults: {e}");
        TilingSettings::default()
    });

    if let Some(kind) = args.layout {
        settings.default_layout = kind;
    }
    if let Some(point) = args.insertion {
        settings.insertion_point = point;
    }
    if args.rotate {
        settings.rotate_layout = true;
    }
    settings
}

fn read_script(args: &cli::Args) -> Result<String, WeftError> {
    match &args.script {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print(placed: &[PlacedWindow]) -> Result<(), WeftError> {
    let json = serde_json::to_string_pretty(placed)
        .map_err(|e| WeftError::Other(format!("failed to encode placements: {e}")))?;
    println!("{json}");
    Ok(())
}

fn run(args: &cli::Args) -> Result<(), WeftError> {
    if !(args.width > 0.0 && args.height > 0.0) {
        return Err(WeftError::Other(format!(
            "screen size {}x{} must be positive",
            args.width, args.height
        )));
    }

    let settings = load_settings(args);
    tracing::info!(
        layout = %settings.default_layout,
        insertion = %settings.insertion_point,
        rotate = settings.rotate_layout,
        "Settings loaded"
    );

    let commands = script::parse_script(&read_script(args)?)?;
    tracing::debug!("Parsed {} commands", commands.len());

    let mut session = Session::new(settings, Rect::new(0.0, 0.0, args.width, args.height));
    for cmd in commands {
        if let Some(placed) = session.run(cmd) {
            print(&placed)?;
        }
    }
    session.flush();
    print(&session.snapshot())
}

fn main() -> ExitCode {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("weft=info");
    let filter = EnvFilter::from_default_env();
    let filter = match log_directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("ignoring bad log directive '{log_directive}': {e}");
            filter
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("weft v{} starting...", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
