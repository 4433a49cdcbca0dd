use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use vectorpad::config::Config;
use vectorpad::draw::{DrawingMode, NullSurface};
use vectorpad::input::InputState;
use vectorpad::plugins;
use vectorpad::registry::ShapeRegistry;
use vectorpad::script::Script;
use vectorpad::session::{self, options_from_config};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VECTORPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "vectorpad")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Vector drawing editor core with undo/redo, plugin shapes and drawing files"
)]
struct Cli {
    /// Use this config file instead of ~/.config/vectorpad/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the shape kinds available for drawing
    Kinds {
        /// Include plugin kinds that are not enabled in the config
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    /// Show information about a drawing file
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Run an event script against an empty drawing and save the result
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Drawing file to write when the script finishes
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,
    },
    /// Write a documented default config file
    NewConfig {
        /// Target path (defaults to ~/.config/vectorpad/config.toml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Kinds { all } => {
            let config = load_config(cli.config.as_deref())?;
            list_kinds(&config, all);
        }
        Commands::Inspect { file } => {
            let config = load_config(cli.config.as_deref())?;
            inspect(&config, &file)?;
        }
        Commands::Replay { script, output } => {
            let config = load_config(cli.config.as_deref())?;
            replay(&config, &script, &output)?;
        }
        Commands::NewConfig { path } => {
            let path = match path.or(cli.config) {
                Some(path) => path,
                None => Config::get_config_path()?,
            };
            Config::create_default_file(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn list_kinds(config: &Config, all: bool) {
    let mut registry = ShapeRegistry::with_builtins();
    let descriptors = if all {
        plugins::available()
    } else {
        plugins::load(&config.plugins.enabled)
    };
    registry.accept_plugins(descriptors);

    for name in registry.names() {
        let Ok(shape) = registry.create(name) else {
            continue;
        };
        let mode = match shape.drawing_mode() {
            DrawingMode::Drag => "drag".to_string(),
            DrawingMode::Click { min_vertices } => format!("click, {min_vertices}+ vertices"),
        };
        println!("{name:<12} {mode}");
    }
}

fn inspect(config: &Config, file: &Path) -> Result<()> {
    let options = options_from_config(&config.storage);
    let info = session::inspect_drawing(file, &options)
        .with_context(|| format!("Failed to inspect {}", file.display()))?;

    println!("Drawing file: {}", info.path.display());
    if !info.exists {
        println!("  (file does not exist)");
        return Ok(());
    }
    if let Some(size) = info.size_bytes {
        println!("  Size: {size} bytes");
    }
    if let Some(modified) = info.modified {
        let modified: DateTime<Local> = modified.into();
        println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("  Compressed: {}", if info.compressed { "yes" } else { "no" });
    println!("  Shapes: {}", info.record_count);
    for (kind, count) in &info.kinds {
        println!("    {kind}: {count}");
    }
    println!(
        "  Backup: {}{}",
        info.backup_path.display(),
        if info.backup_exists { "" } else { " (none)" }
    );
    Ok(())
}

fn replay(config: &Config, script_path: &Path, output: &Path) -> Result<()> {
    let script = Script::from_file(script_path)?;
    let options = options_from_config(&config.storage);
    let mut state = InputState::from_config(config, Box::new(NullSurface));

    let base_dir = script_path.parent().unwrap_or_else(|| Path::new("."));
    let report = script.run(&mut state, &options, base_dir)?;

    let saved = state
        .save_to(output, &options)
        .with_context(|| format!("Failed to save drawing to {}", output.display()))?;

    println!(
        "Replayed {} steps; saved {} shapes ({} bytes{}) to {}",
        report.steps,
        saved.shapes,
        saved.bytes,
        if saved.compressed { ", gzip" } else { "" },
        output.display()
    );
    if report.skipped > 0 {
        println!("  {} record(s) skipped while loading", report.skipped);
    }
    if state.is_drawing() {
        println!("  Note: an unfinished shape was discarded");
    }
    Ok(())
}
