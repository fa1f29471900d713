//! File logging. The terminal belongs to the UI, so log lines go to
//! `<data-dir>/snake.log`.

use crate::constants::LOG_FILE_NAME;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Parse a `--log-level` value. Unknown names give `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE_NAME)
}

/// Message shown on stderr when the game panics. Details go to the log only.
pub fn crash_notice(log_path: &Path) -> String {
    format!(
        "snake stopped after an internal error. Details are in {}",
        log_path.display()
    )
}

/// Install the global logger, appending to the log file in `data_dir`.
pub fn init(data_dir: &Path, level: LevelFilter) -> io::Result<PathBuf> {
    let path = log_path(data_dir);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build();
    WriteLogger::init(level, config, file)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;
    Ok(path)
}
