//! Logging bootstrap
//!
//! The library only emits through the `log` facade. The binary calls
//! `init_logging` once to route records to stderr via `flexi_logger`.
//! `RUST_LOG` wins over the level derived from `-v` flags.

use flexi_logger::{Logger, LoggerHandle};
use log::info;

use crate::error::{RefactorError, Result};

/// Log level for a `-v` repetition count
pub fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start stderr logging
///
/// Keep the returned handle alive for the lifetime of the process.
pub fn init_logging(verbosity: u8) -> Result<LoggerHandle> {
    let level = default_log_level(verbosity);
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| RefactorError::Config(format!("invalid log level `{level}`: {err}")))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| RefactorError::Config(format!("failed to start logger: {err}")))?;

    info!(
        "event=app_start status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
