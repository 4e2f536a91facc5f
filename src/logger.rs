//! Logging setup.
//!
//! Library code logs through the `log` macros; this module installs a `fern`
//! dispatcher writing timestamped lines to a file when logging is enabled.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::constants::{CONFIG_DIR_NAME, DEFAULT_LOG_FILE_NAME};

/// Default log file location inside the user's data directory.
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(DEFAULT_LOG_FILE_NAME))
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

/// Build the dispatcher for `config`, or `None` when logging is disabled.
pub fn dispatch(config: &LoggingConfig) -> Result<Option<fern::Dispatch>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = match &config.file {
        Some(path) => path.clone(),
        None => get_log_file_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter()?)
        .chain(file);

    Ok(Some(dispatch))
}

/// Install the global logger. Returns whether a logger was installed.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    match dispatch(config)? {
        Some(dispatch) => {
            dispatch.apply().context("Failed to install logger")?;
            Ok(true)
        }
        None => Ok(false),
    }
}
