//! Logging utilities
//!
//! This module provides functionality to initialize logging for the
//! application. Logs go to a size-rotated file in the user cache directory so
//! they never draw over the terminal UI.

use std::fs::remove_file;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use env_logger::{Builder, Target, fmt::TimestampPrecision};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::LevelFilter;

/// Name of the active log file.
const LOG_FILE_NAME: &str = "news_reader.log";

/// Size at which the log file is rotated.
const LOG_FILE_LIMIT: usize = 1024 * 1024;

/// Rotated files kept next to the active one.
const LOG_FILES_KEPT: usize = 3;

/// Path of the log file in the user cache directory.
///
/// # Errors
///
/// Returns an error if the user's home directory can't be determined.
pub fn default_log_path() -> Result<PathBuf>
{
    let base_dirs = BaseDirs::new().context("Failed to determine user directories")?;

    Ok(base_dirs
        .cache_dir()
        .join(LOG_FILE_NAME))
}

/// Builds the rotating writer for `log_path`.
fn rotating_writer(log_path: &Path) -> FileRotate<AppendCount>
{
    FileRotate::new(
        log_path,
        AppendCount::new(LOG_FILES_KEPT),
        ContentLimit::Bytes(LOG_FILE_LIMIT),
        Compression::None,
        #[cfg(unix)]
        None,
    )
}

/// Initializes the logging system for the application.
///
/// Sets up the log file, log level and log format.
///
/// # Arguments
///
/// * `log_path` - File to append log records to
///
/// # Errors
///
/// Returns an error if the log directory can't be created or a logger is
/// already installed.
pub fn init_logging(log_path: &Path) -> Result<()>
{
    if let Some(parent) = log_path.parent()
    {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create log directory {}", parent.display())
        })?;
    }

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("news_reader", LevelFilter::Debug)
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(rotating_writer(log_path))))
        .try_init()
        .context("Failed to initialize logger")
}

/// Removes the log file.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but can't be removed.
pub fn clear_log_file(log_path: &Path) -> Result<()>
{
    if !log_path.exists()
    {
        return Ok(());
    }

    remove_file(log_path)
        .with_context(|| format!("Failed to remove log file {}", log_path.display()))
}
