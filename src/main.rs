//! Hotfolder daemon entry point.

use std::path::PathBuf;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use hotfolder::{CliOverrides, Config, FolderWatcher};

/// Parse command line arguments: three optional positionals
/// (`watch_dir archive_dir print_flag`) plus a few flags.
fn parse_args() -> CliOverrides {
    let args: Vec<String> = std::env::args().collect();
    let mut overrides = CliOverrides::default();
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-v" => {
                println!("hotfolder v{}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    overrides.config_path = Some(PathBuf::from(&args[i]));
                }
            }
            "--no-archive" => {
                overrides.no_archive = true;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
            other => {
                positional.push(other.to_string());
            }
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    overrides.watch_dir = positional.next().map(PathBuf::from);
    overrides.archive_dir = positional.next().map(PathBuf::from);
    overrides.print_flag = positional.next();
    overrides
}

fn print_help() {
    println!(
        r#"Hotfolder - watch a directory, extract and print incoming documents, archive them

USAGE:
    hotfolder [OPTIONS] [WATCH_DIR] [ARCHIVE_DIR] [PRINT_FLAG]

ARGS:
    WATCH_DIR      Directory watched for new files (default: ~/Documents/hotfolder/inbox)
    ARCHIVE_DIR    Directory processed files are moved to (default: ~/Documents/hotfolder/archive)
    PRINT_FLAG     "print" or "true" sends processed files to the printer

OPTIONS:
    -h, --help              Show this help message
    -v, --version           Show version
    -c, --config <PATH>     Path to configuration file
    --no-archive            Leave processed files in the watch directory

BEHAVIOR:
    Files already present at startup are recorded but not processed. Each new
    file is read after a short settle delay, its content is displayed (Word
    and PDF documents are decoded to text, unreadable binaries get a size
    summary), optionally printed, and the file is moved to the archive
    directory. Name collisions in the archive get a timestamp suffix.

EXAMPLES:
    hotfolder                               # Defaults under ~/Documents/hotfolder
    hotfolder /srv/in /srv/done print       # Custom directories, printing on
    hotfolder /srv/in --no-archive          # Process in place
    hotfolder --config ~/hotfolder.toml     # Custom configuration
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let overrides = parse_args();

    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(Config::default_config_path);
    let mut config = Config::load_from_path(config_path.clone());
    config.apply(&overrides);

    // Initialize logging
    let level: Level = config.general.log_level.parse().unwrap_or(Level::INFO);
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    info!("Starting hotfolder v{}", env!("CARGO_PKG_VERSION"));
    info!("Config:   {}", config_path.display());
    info!("Watching: {}", config.intake.watch_dir.display());
    match &config.intake.archive_dir {
        Some(dir) => info!("Archive:  {}", dir.display()),
        None => info!("Archive:  disabled, processed files stay in place"),
    }
    info!(
        "Printing: {}",
        if config.printing.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    let mut watcher = FolderWatcher::new(config)?;
    if let Err(e) = watcher.initialize() {
        error!("Failed to initialize watch directory: {e}");
        return Err(e.into());
    }

    watcher.run().await?;

    info!("Shutdown complete");
    Ok(())
}
