use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Where log output goes for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The TUI owns the terminal, so logs go to a file.
    File,
    /// Subcommands log to stderr at `[log] cli_level`.
    Stderr,
}

/// Path of the TUI log file
pub fn log_file_path(config: &LogConfig) -> PathBuf {
    config
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("taskgroups.log"))
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// configured level. The returned guard must live until exit so buffered
/// file output is flushed.
pub fn init_logging(config: &LogConfig, target: LogTarget) -> Option<WorkerGuard> {
    match target {
        LogTarget::File => {
            let path = log_file_path(config);
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            let file_name = path.file_name()?.to_str()?;
            // The builder reports a bad directory instead of panicking.
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(dir)
                .ok()?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_env_filter(env_filter(default_directive(config, target)))
                .with_ansi(false)
                .try_init()
                .ok()?;
            Some(guard)
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(default_directive(config, target)))
                .without_time()
                .with_target(false)
                .try_init();
            None
        }
    }
}

/// Configured filter directive for `target`, used when `RUST_LOG` is unset
fn default_directive(config: &LogConfig, target: LogTarget) -> &str {
    match target {
        LogTarget::File => &config.level,
        LogTarget::Stderr => &config.cli_level,
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
