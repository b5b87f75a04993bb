//! Client configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap the client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Where slot files live; platform default when unset.
    pub data_dir: Option<PathBuf>,

    /// Where log files go when file logging is on; platform default when
    /// unset.
    pub log_dir: Option<PathBuf>,

    /// Fail `Update`/`Delete` that match nothing instead of no-opping.
    pub strict: bool,

    /// Write logs to a rolling file instead of stderr.
    pub file_log: bool,

    /// Flush command queue depth per store.
    pub flush_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_dir: None,
            strict: false,
            file_log: false,
            flush_buffer: 16,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRAVELOG_DATA_DIR` - Directory for slot files (default: platform-specific)
    /// - `TRAVELOG_LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `TRAVELOG_STRICT` - Fail fast on no-match update/delete (default: false)
    /// - `TRAVELOG_FILE_LOG` - Log to a rolling file instead of stderr (default: false)
    /// - `TRAVELOG_FLUSH_BUFFER` - Flush queue depth per store (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("TRAVELOG_DATA_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("TRAVELOG_LOG_DIR").ok().map(PathBuf::from);

        if let Some(strict) = read_env::<bool>("TRAVELOG_STRICT") {
            config.strict = strict;
        } else if env::var("TRAVELOG_STRICT").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.strict = true;
        }

        if let Some(file_log) = read_env::<bool>("TRAVELOG_FILE_LOG") {
            config.file_log = file_log;
        } else if env::var("TRAVELOG_FILE_LOG").is_ok() {
            config.file_log = true;
        }

        if let Some(buffer) = read_env::<usize>("TRAVELOG_FLUSH_BUFFER") {
            config.flush_buffer = buffer.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
