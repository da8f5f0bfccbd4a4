//! File-based logging bootstrap.
//!
//! Logs go to rotating files rather than stderr because the TUI owns the
//! terminal. Initialization happens at most once per process; later calls
//! with the same settings are no-ops and conflicting ones are rejected.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

use crate::io::config_io::default_log_dir;
use crate::model::config::LogConfig;

const LOG_FILE_BASENAME: &str = "textdesk";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level '{0}'; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),
    #[error("log directory must be an absolute path, got '{0}'")]
    RelativeDir(String),
    #[error("could not create log directory '{path}': {message}")]
    CreateDir { path: String, message: String },
    #[error("failed to start logger: {0}")]
    Backend(String),
    #[error("logging already initialized with {active}; refusing to switch to {requested}")]
    Conflict { active: String, requested: String },
}

/// Level used when config does not set one: `debug` for debug builds,
/// `info` otherwise
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Start the file logger at `level` writing into `log_dir`.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeDir(log_dir.display().to_string()));
    }

    if let Some(state) = LOGGING_STATE.get() {
        return check_matches(state, level, log_dir);
    }

    std::fs::create_dir_all(log_dir).map_err(|e| LoggingError::CreateDir {
        path: log_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|e| LoggingError::Backend(e.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| LoggingError::Backend(e.to_string()))?;

    let state = LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    };
    if let Err(state) = LOGGING_STATE.set(state) {
        // Lost a race with another initializer; keep theirs.
        drop(state);
        if let Some(active) = LOGGING_STATE.get() {
            return check_matches(active, level, log_dir);
        }
    }

    info!(
        "event=app_start status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );
    Ok(())
}

/// Start logging from the `[log]` config section; unset keys use the
/// build default level and the state directory.
pub fn init_from_config(log: &LogConfig) -> Result<(), LoggingError> {
    let level = log.level.as_deref().unwrap_or_else(|| default_log_level());
    let dir = log
        .dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(default_log_dir);
    init_logging(level, &dir)
}

/// Active `(level, dir)`, or `None` before initialization
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

fn check_matches(state: &LoggingState, level: &'static str, log_dir: &Path) -> Result<(), LoggingError> {
    if state.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            active: format!("directory '{}'", state.log_dir.display()),
            requested: format!("'{}'", log_dir.display()),
        });
    }
    if state.level != level {
        return Err(LoggingError::Conflict {
            active: format!("level '{}'", state.level),
            requested: format!("'{level}'"),
        });
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}
