//! Tracing subscriber setup for the client.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::ClientConfig;
use crate::dirs;

/// Initializes the global subscriber.
///
/// Defaults to stderr so command output on stdout stays clean. With
/// `TRAVELOG_FILE_LOG` set, logs go to a daily-rolling file under the log
/// directory instead; the returned guard must stay alive for the process
/// lifetime or buffered lines are lost.
pub fn init(config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    if config.file_log {
        let log_dir = match &config.log_dir {
            Some(dir) => dir.clone(),
            None => dirs::log_dir()?,
        };
        std::fs::create_dir_all(&log_dir)?;

        let appender = tracing_appender::rolling::daily(log_dir, "travelog.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();

        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();

        Ok(None)
    }
}
