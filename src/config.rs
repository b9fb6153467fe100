//! Configuration for the hotfolder daemon.
//!
//! Loads configuration from a TOML file with runtime defaults, then applies
//! command line overrides. No environment variables are consumed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub printing: PrintingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            intake: IntakeConfig::default(),
            timing: TimingConfig::default(),
            printing: PrintingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Directory watched for incoming files
    #[serde(default = "default_watch_dir")]
    pub watch_dir: PathBuf,

    /// Where processed files are moved; `None` leaves them in place
    #[serde(default = "default_archive_dir")]
    pub archive_dir: Option<PathBuf>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            watch_dir: default_watch_dir(),
            archive_dir: default_archive_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between detecting a file and reading it, so the writer can
    /// finish. Best effort only.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// How long rendered print temp files stay on disk after submission
    #[serde(default = "default_spool_grace")]
    pub spool_grace_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            spool_grace_ms: default_spool_grace(),
        }
    }
}

impl TimingConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn spool_grace(&self) -> Duration {
        Duration::from_millis(self.spool_grace_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintingConfig {
    /// Whether processed files are sent to the printer
    #[serde(default)]
    pub enabled: bool,

    /// Destination printer; `None` uses the system default
    #[serde(default)]
    pub printer: Option<String>,
}

impl Default for PrintingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            printer: None,
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_documents_root() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hotfolder")
}

fn default_watch_dir() -> PathBuf {
    default_documents_root().join("inbox")
}

fn default_archive_dir() -> Option<PathBuf> {
    Some(default_documents_root().join("archive"))
}

fn default_settle_delay() -> u64 {
    500
}

fn default_spool_grace() -> u64 {
    10_000
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_config_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Self {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file found at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hotfolder")
            .join("config.toml")
    }

    /// Apply command line overrides on top of the loaded configuration.
    ///
    /// The positional print flag enables printing only for the values
    /// `"print"` and `"true"`; any other value disables it.
    pub fn apply(&mut self, overrides: &CliOverrides) {
        if let Some(dir) = &overrides.watch_dir {
            self.intake.watch_dir = dir.clone();
        }
        if overrides.no_archive {
            self.intake.archive_dir = None;
        } else if let Some(dir) = &overrides.archive_dir {
            self.intake.archive_dir = Some(dir.clone());
        }
        if let Some(flag) = &overrides.print_flag {
            self.printing.enabled = matches!(flag.as_str(), "print" | "true");
        }
    }
}

/// Settings collected from the command line, applied over the file-based
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub watch_dir: Option<PathBuf>,
    pub archive_dir: Option<PathBuf>,
    pub print_flag: Option<String>,
    pub no_archive: bool,
}
