//! Tracing subscriber setup.
//!
//! The terminal belongs to the chat transcript, so logs go to a daily
//! rolling file by default. `RUST_LOG` overrides the default filter.

use crate::paths::MailmatePaths;
use mailmate_core::error::{MailmateError, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "mailmate=info";
const LOG_FILE_PREFIX: &str = "mailmate.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rolling files under the given directory.
    File(PathBuf),
    /// Standard error.
    Stderr,
}

impl LogTarget {
    /// Rolling files in the default log directory.
    pub fn default_file() -> Result<Self> {
        MailmatePaths::log_dir()
            .map(LogTarget::File)
            .map_err(|e| MailmateError::config(e.to_string()))
    }
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the background log writer.
pub fn init_logging(target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| MailmateError::internal(format!("Failed to init logging: {e}")))?;
            Ok(None)
        }
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| MailmateError::internal(format!("Failed to init logging: {e}")))?;
            Ok(Some(guard))
        }
    }
}
