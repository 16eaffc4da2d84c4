// File: ./src/logging.rs
// Logger setup for the binary. Library code only uses the `log` macros.
use crate::context::AppContext;
use anyhow::Result;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;
use std::str::FromStr;

pub const LOG_ENV_VAR: &str = "SYLLABUS_RADAR_LOG";

/// `SYLLABUS_RADAR_LOG` wins over the configured level when it parses.
pub fn effective_level(configured: LevelFilter) -> LevelFilter {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(configured)
}

/// Appends to the cache-dir log file. With `to_stderr`, warnings and errors are
/// also echoed to the terminal (not used while the TUI owns the screen).
pub fn init(ctx: &dyn AppContext, level: LevelFilter, to_stderr: bool) -> Result<()> {
    let level = effective_level(level);
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if let Some(path) = ctx.get_log_path() {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config.clone(), file)),
            Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
        }
    }

    if to_stderr {
        loggers.push(TermLogger::new(
            level.min(LevelFilter::Warn),
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
