use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the interchange file lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Export target and default import source. Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("taskGroups.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive for the TUI log file; `RUST_LOG` takes
    /// precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Filter directive for subcommands, which log to stderr
    #[serde(default = "default_cli_log_level")]
    pub cli_level: String,
    /// Log file for the TUI. Defaults to `taskgroups.log` in the temp dir.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            cli_level: default_cli_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cli_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme overrides, e.g. `accent = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            tag_colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
